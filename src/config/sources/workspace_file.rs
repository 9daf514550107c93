//! Workspace config file sources: `changegen.toml` at the workspace root, then
//! `<changeset dir>/changegen.toml` and `<changeset dir>/changegen.{CHANGEGEN_ENV}.toml`.
//!
//! The changeset directory is itself configurable, so it is resolved from the
//! outer layers (defaults, global file, root file, environment) before the files
//! inside it are read.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Workspace configuration file name, at the root and inside the changeset directory.
pub const WORKSPACE_CONFIG_FILE: &str = "changegen.toml";

/// Root-level workspace file, read before the changeset directory is known.
pub fn root_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(WORKSPACE_CONFIG_FILE)
}

/// Candidate workspace files in merge order. `changeset_dir` is relative to the
/// workspace root unless absolute.
pub fn workspace_config_paths(workspace_root: &Path, changeset_dir: &Path) -> Vec<PathBuf> {
    let changeset_dir = workspace_root.join(changeset_dir);
    let mut paths = vec![
        root_config_path(workspace_root),
        changeset_dir.join(WORKSPACE_CONFIG_FILE),
    ];
    if let Ok(env_name) = std::env::var("CHANGEGEN_ENV") {
        if !env_name.is_empty() {
            paths.push(changeset_dir.join(format!("changegen.{}.toml", env_name)));
        }
    }
    paths
}

/// Add the root workspace file to builder if it exists.
pub fn add_root_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = root_config_path(workspace_root);
    if path.is_file() {
        builder.add_source(File::from(path.as_path()).required(false))
    } else {
        builder
    }
}

/// Add existing workspace config files to builder.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
    changeset_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for path in workspace_config_paths(workspace_root, changeset_dir) {
        if path.is_file() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
    }
    Ok(builder)
}
