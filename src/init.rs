//! Workspace initialization for the `changegen init` command.
//!
//! Creates the changeset directory with a README describing the file format and
//! release procedure, and a `changegen.toml` holding the default configuration.

use crate::config::{ChangegenConfig, WORKSPACE_CONFIG_FILE};
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// README placed in the changeset directory, embedded at compile time
pub const CHANGESET_README: &str = include_str!("../templates/changeset-readme.md");

/// Result of initialization
#[derive(Debug, Clone, Default)]
pub struct InitResult {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// Summary of `initialize`
#[derive(Debug, Clone)]
pub struct InitSummary {
    pub changeset_dir: PathBuf,
    pub files: InitResult,
}

/// Set up the changeset directory under `root`.
///
/// Existing files are left alone unless `force` is set. Write failures are
/// collected in the summary rather than aborting.
pub fn initialize(root: &Path, config: &ChangegenConfig, force: bool) -> Result<InitSummary, ApiError> {
    let changeset_dir = root.join(&config.changeset.dir);
    std::fs::create_dir_all(&changeset_dir).map_err(|e| ApiError::io(&changeset_dir, e))?;

    // Defaults, except the directory the file itself lives in.
    let mut written = ChangegenConfig::default();
    written.changeset.dir = config.changeset.dir.clone();
    let default_config =
        toml::to_string_pretty(&written).map_err(|e| ApiError::Serialization(e.to_string()))?;

    let files = [
        (changeset_dir.join("README.md"), CHANGESET_README.to_string()),
        (changeset_dir.join(WORKSPACE_CONFIG_FILE), default_config),
    ];

    let mut result = InitResult::default();
    for (path, contents) in files {
        if path.exists() && !force {
            debug!(path = %path.display(), "File exists; skipping");
            result.skipped.push(path);
            continue;
        }
        match std::fs::write(&path, contents) {
            Ok(()) => result.created.push(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write file");
                result.errors.push(format!("Failed to write {}: {}", path.display(), e));
            }
        }
    }

    Ok(InitSummary {
        changeset_dir,
        files: result,
    })
}
