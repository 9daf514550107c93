//! `changegen release-notes`

use super::test_utils::acme_workspace;

#[test]
fn test_release_notes_for_pending_changesets() {
    let ws = acme_workspace();
    ws.changeset(
        "add-clone",
        "---\n\"@acme/tree\": minor\n\"__section\": feature\n---\n\nAdd `Tree.clone`\n\nCopies a subtree.\n",
    )
    .changeset("fix-core", "---\n\"@acme/core\": patch\n\"__section\": fix\n---\n\nFix sync race\n")
    .changeset(
        "internal",
        "---\n\"@acme/core\": patch\n\"__includeInReleaseNotes\": false\n---\n\nRefactor internals\n",
    );

    let notes = ws.run(&["release-notes", "--version", "2.2.0"]).unwrap();
    assert_eq!(
        notes,
        "# Release Notes v2.2.0\n\
         \n## Contents\n\n\
         - [New Features](#new-features)\n    - [Add `Tree.clone`](#add-treeclone)\n\
         - [Bug Fixes](#bug-fixes)\n    - [Fix sync race](#fix-sync-race)\n\
         \n## New Features\n\
         \n### Add `Tree.clone`\n\nCopies a subtree.\n\n#### Change details\n\nAffected packages:\n\n- @acme/tree\n\
         \n## Bug Fixes\n\
         \n### Fix sync race\n\n#### Change details\n\nAffected packages:\n\n- @acme/core"
    );
}

#[test]
fn test_release_notes_to_file_keeps_changesets() {
    let ws = acme_workspace();
    ws.changeset("feat", "---\n\"app\": minor\n---\n\nDark mode\n");

    let output = ws
        .run(&["release-notes", "--heading", "Acme", "--out", "RELEASE_NOTES.md"])
        .unwrap();
    assert!(output.starts_with("Release notes written to "), "{}", output);

    let notes = ws.read("RELEASE_NOTES.md");
    assert!(notes.starts_with("# Acme\n"));
    assert!(notes.contains("## Other Changes\n"));
    assert!(notes.ends_with("- app\n"));
    assert_eq!(ws.changeset_files(), vec!["feat.md"]);
}

#[test]
fn test_release_notes_without_changes() {
    let ws = acme_workspace();
    assert_eq!(
        ws.run(&["release-notes"]).unwrap(),
        "# Release Notes\n\nNo changes in this release."
    );
}
