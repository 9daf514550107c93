//! Integration tests for layered configuration loading

use super::test_utils::{with_isolated_env, TestWorkspace};
use changegen::cli::{Commands, RunContext};
use changegen::config::{global_config_path, ChangegenConfig, ConfigLoader, DependentBump, UnknownPackagePolicy};
use changegen::error::ApiError;
use tempfile::TempDir;

#[test]
fn test_defaults_without_files() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    let config = with_isolated_env(&env_dir, &[], || ConfigLoader::load(ws.root()).unwrap());
    assert_eq!(config, ChangegenConfig::default());
}

#[test]
fn test_workspace_files_layer_in_order() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write(
        "changegen.toml",
        "[changelog]\nfile_name = \"HISTORY.md\"\n\n[release]\nunknown_packages = \"warn\"\n",
    )
    .write(
        ".changeset/changegen.toml",
        "[changelog]\nfile_name = \"CHANGES.md\"\n",
    )
    .write(
        ".changeset/changegen.ci.toml",
        "[release]\ninternal_dependents = \"none\"\n",
    );

    let config = with_isolated_env(&env_dir, &[], || ConfigLoader::load(ws.root()).unwrap());
    assert_eq!(config.changelog.file_name, "CHANGES.md");
    assert_eq!(config.release.unknown_packages, UnknownPackagePolicy::Warn);
    assert_eq!(config.release.internal_dependents, DependentBump::Patch);

    let config = with_isolated_env(&env_dir, &[("CHANGEGEN_ENV", "ci")], || {
        ConfigLoader::load(ws.root()).unwrap()
    });
    assert_eq!(config.release.internal_dependents, DependentBump::None);
}

#[test]
fn test_files_follow_configured_changeset_dir() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write("changegen.toml", "[changeset]\ndir = \"changes\"\n")
        .write("changes/changegen.toml", "[changelog]\nfile_name = \"CHANGES.md\"\n")
        .write(".changeset/changegen.toml", "[changelog]\nfile_name = \"IGNORED.md\"\n");

    let config = with_isolated_env(&env_dir, &[], || ConfigLoader::load(ws.root()).unwrap());
    assert_eq!(config.changeset.dir, std::path::PathBuf::from("changes"));
    assert_eq!(config.changelog.file_name, "CHANGES.md");

    let config = with_isolated_env(&env_dir, &[("CHANGEGEN__CHANGESET__DIR", ".changeset")], || {
        ConfigLoader::load(ws.root()).unwrap()
    });
    assert_eq!(config.changelog.file_name, "IGNORED.md");
}

#[test]
fn test_init_config_in_custom_dir_is_loaded() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write("changegen.toml", "[changeset]\ndir = \"changes\"\n");

    with_isolated_env(&env_dir, &[], || {
        let context = RunContext::new(ws.root().to_path_buf(), None).unwrap();
        context.execute(&Commands::Init { force: false }).unwrap();
        assert!(ws.exists("changes/changegen.toml"));
        assert!(!ws.exists(".changeset"));

        let written = ws.read("changes/changegen.toml");
        ws.write(
            "changes/changegen.toml",
            &written.replace("heading = \"Release Notes\"", "heading = \"Acme Release\""),
        );
        let config = ConfigLoader::load(ws.root()).unwrap();
        assert_eq!(config.changeset.dir, std::path::PathBuf::from("changes"));
        assert_eq!(config.release_notes.heading, "Acme Release");
    });
}

#[test]
fn test_global_file_under_workspace_files() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write(".changeset/changegen.toml", "[changelog]\nfile_name = \"CHANGES.md\"\n");

    let config = with_isolated_env(&env_dir, &[], || {
        let global = global_config_path().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(
            &global,
            "[changelog]\nfile_name = \"GLOBAL.md\"\n\n[release_notes]\nheading = \"Acme Release\"\n",
        )
        .unwrap();
        ConfigLoader::load(ws.root()).unwrap()
    });
    assert_eq!(config.changelog.file_name, "CHANGES.md");
    assert_eq!(config.release_notes.heading, "Acme Release");
}

#[test]
fn test_environment_overrides_files() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write(".changeset/changegen.toml", "[release]\nunknown_packages = \"warn\"\n");

    let config = with_isolated_env(
        &env_dir,
        &[
            ("CHANGEGEN__RELEASE__UNKNOWN_PACKAGES", "ignore"),
            ("CHANGEGEN__CHANGESET__REQUIRE_SECTION", "true"),
        ],
        || ConfigLoader::load(ws.root()).unwrap(),
    );
    assert_eq!(config.release.unknown_packages, UnknownPackagePolicy::Ignore);
    assert!(config.changeset.require_section);
}

#[test]
fn test_sections_and_fixed_groups_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("release.toml");
    std::fs::write(
        &path,
        r#"
[changeset]
default_section = "misc"

[[sections]]
name = "feature"
title = "Features"

[[sections]]
name = "misc"
title = "Miscellaneous"

[[release.fixed]]
name = "client"
packages = ["@acme/*", "acme-framework"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.sections.len(), 2);
    assert_eq!(config.section("misc").unwrap().title, "Miscellaneous");
    assert!(config.release.fixed[0].contains("@acme/tree"));
    assert!(config.release.fixed[0].contains("acme-framework"));
    assert!(!config.release.fixed[0].contains("other"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(&path, "[changelog]\nversion_header = \"## release\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(ref m) if m.contains("version_header")), "{:?}", err);

    let err = RunContext::new(temp.path().to_path_buf(), Some(temp.path().join("missing.toml")))
        .err()
        .unwrap();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn test_configured_changelog_file_name_is_used() {
    let ws = TestWorkspace::new();
    ws.package("packages/core", "core", "1.0.0", &[])
        .changeset("fix", "---\n\"core\": patch\n---\n\nFix\n");
    let mut config = ChangegenConfig::default();
    config.changelog.file_name = "HISTORY.md".to_string();
    config.changelog.version_header = "## v{version}".to_string();

    ws.run_with(config, &["version"]).unwrap();
    assert_eq!(
        ws.read("packages/core/HISTORY.md"),
        "# core\n\n## v1.0.1\n\n### Patch Changes\n\n-   Fix\n"
    );
    assert!(!ws.exists("packages/core/CHANGELOG.md"));
}
