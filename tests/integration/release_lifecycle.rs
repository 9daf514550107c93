//! The `version` command end to end

use super::test_utils::{acme_workspace, TestWorkspace};

fn with_changesets() -> TestWorkspace {
    let ws = acme_workspace();
    ws.changeset(
        "add-clone",
        "---\n\"@acme/tree\": minor\n\"__section\": feature\n---\n\nAdd `Tree.clone`\n\nCopies a subtree.\n",
    )
    .changeset(
        "fix-core",
        "---\n\"@acme/core\": patch\n\"__section\": fix\n---\n\nFix sync race\n",
    )
    .write(
        "packages/tree/CHANGELOG.md",
        "# @acme/tree\n\n## 2.1.0\n\n### Minor Changes\n\n-   Initial tree\n",
    );
    ws
}

#[test]
fn test_version_updates_manifests_and_changelogs() {
    let ws = with_changesets();
    let output = ws.run(&["version"]).unwrap();
    assert!(output.contains("Updated manifests (2)"), "{}", output);
    assert!(output.contains("Updated changelogs (2)"), "{}", output);
    assert!(output.contains("Removed changesets (2)"), "{}", output);

    let tree_manifest = ws.read("packages/tree/package.json");
    assert_eq!(
        tree_manifest,
        "{\n  \"name\": \"@acme/tree\",\n  \"version\": \"2.2.0\",\n  \"dependencies\": {\n    \"@acme/core\": \"~2.1.1\"\n  }\n}\n"
    );
    assert!(ws.read("packages/core/package.json").contains("\"version\": \"2.1.1\""));
    assert!(ws.read("apps/app/package.json").contains("\"@acme/tree\": \"workspace:*\""));
    assert!(ws.read("apps/app/package.json").contains("\"version\": \"0.4.2\""));

    assert_eq!(
        ws.read("packages/tree/CHANGELOG.md"),
        "# @acme/tree\n\n## 2.2.0\n\n### Minor Changes\n\n-   Add `Tree.clone`\n\n    Copies a subtree.\n\n## 2.1.0\n\n### Minor Changes\n\n-   Initial tree\n"
    );
    assert_eq!(
        ws.read("packages/core/CHANGELOG.md"),
        "# @acme/core\n\n## 2.1.1\n\n### Patch Changes\n\n-   Fix sync race\n"
    );
    assert!(!ws.exists("apps/app/CHANGELOG.md"));
    assert!(ws.changeset_files().is_empty());
}

#[test]
fn test_version_twice_is_a_noop() {
    let ws = with_changesets();
    ws.run(&["version"]).unwrap();
    let tree_changelog = ws.read("packages/tree/CHANGELOG.md");
    let tree_manifest = ws.read("packages/tree/package.json");

    let output = ws.run(&["version"]).unwrap();
    assert_eq!(output, "No pending changesets; nothing to version.");
    assert_eq!(ws.read("packages/tree/CHANGELOG.md"), tree_changelog);
    assert_eq!(ws.read("packages/tree/package.json"), tree_manifest);
}

#[test]
fn test_dry_run_changes_nothing() {
    let ws = with_changesets();
    let manifest = ws.read("packages/tree/package.json");

    let output = ws.run(&["version", "--dry-run"]).unwrap();
    assert!(output.starts_with("Dry run"), "{}", output);
    assert!(output.contains("Would update manifests (2)"), "{}", output);

    assert_eq!(ws.read("packages/tree/package.json"), manifest);
    assert!(!ws.exists("packages/core/CHANGELOG.md"));
    assert_eq!(ws.changeset_files().len(), 2);
}

#[test]
fn test_keep_changesets() {
    let ws = with_changesets();
    ws.run(&["version", "--keep-changesets"]).unwrap();
    assert_eq!(ws.changeset_files(), vec!["add-clone.md", "fix-core.md"]);
    assert!(ws.read("packages/core/package.json").contains("\"version\": \"2.1.1\""));
}

#[test]
fn test_dependency_only_release_entry() {
    let ws = acme_workspace();
    ws.changeset("fix-core", "---\n\"@acme/core\": patch\n---\n\nFix\n");
    ws.run(&["version"]).unwrap();
    assert_eq!(
        ws.read("packages/tree/CHANGELOG.md"),
        "# @acme/tree\n\n## 2.1.1\n\nDependency updates only.\n"
    );
}

#[test]
fn test_prerelease_graduates() {
    let ws = TestWorkspace::new();
    ws.package("packages/beta", "beta", "3.0.0-rc.2", &[])
        .changeset("ship", "---\n\"beta\": minor\n---\n\nShip it\n");
    ws.run(&["version"]).unwrap();
    assert!(ws.read("packages/beta/package.json").contains("\"version\": \"3.0.0\""));
    assert!(ws.read("packages/beta/CHANGELOG.md").contains("## 3.0.0\n"));
}

#[test]
fn test_empty_changeset_is_consumed_without_releases() {
    let ws = acme_workspace();
    ws.changeset("docs", "---\n---\n\nDocs only\n");
    let output = ws.run(&["version"]).unwrap();
    assert!(output.contains("Removed changesets (1)"), "{}", output);
    assert!(!ws.exists("packages/core/CHANGELOG.md"));
    assert!(ws.changeset_files().is_empty());
}

#[test]
fn test_add_then_version() {
    let ws = acme_workspace();
    ws.run(&["add", "-p", "app:major", "--title", "Drop Node 16"]).unwrap();
    ws.run(&["version"]).unwrap();
    assert!(ws.read("apps/app/package.json").contains("\"version\": \"1.0.0\""));
    assert_eq!(
        ws.read("apps/app/CHANGELOG.md"),
        "# app\n\n## 1.0.0\n\n### Major Changes\n\n-   Drop Node 16\n"
    );
}
