//! `changegen init`

use super::test_utils::{with_isolated_env, TestWorkspace};
use changegen::config::{ChangegenConfig, ConfigLoader};
use tempfile::TempDir;

#[test]
fn test_init_creates_directory_files() {
    let ws = TestWorkspace::new();
    let output = ws.run(&["init"]).unwrap();
    assert!(output.starts_with("Initialized changeset directory: .changeset"), "{}", output);
    assert!(output.contains("README.md"));
    assert!(ws.read(".changeset/README.md").contains("## Release procedure"));
    assert!(ws.read(".changeset/changegen.toml").contains("[changelog]"));
}

#[test]
fn test_init_skips_then_forces() {
    let ws = TestWorkspace::new();
    ws.write(".changeset/README.md", "custom\n");

    let output = ws.run(&["init"]).unwrap();
    assert!(output.contains("already exists, skipped"), "{}", output);
    assert!(output.contains("--force"));
    assert_eq!(ws.read(".changeset/README.md"), "custom\n");

    let output = ws.run(&["init", "--force"]).unwrap();
    assert!(output.contains("(overwritten)"), "{}", output);
    assert_ne!(ws.read(".changeset/README.md"), "custom\n");
}

#[test]
fn test_initialized_workspace_loads_default_config() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.run(&["init"]).unwrap();
    let config = with_isolated_env(&env_dir, &[], || ConfigLoader::load(ws.root()).unwrap());
    assert_eq!(config, ChangegenConfig::default());
}

#[test]
fn test_new_workspace_checks_clean() {
    let ws = TestWorkspace::new();
    ws.package("packages/core", "core", "1.0.0", &[]);
    ws.run(&["init"]).unwrap();
    let output = ws.run(&["check"]).unwrap();
    assert!(output.ends_with("Checked 0 changeset(s): 0 error(s), 0 warning(s)"), "{}", output);
}
