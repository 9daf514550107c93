//! Config loader facade: the single entry point for building a [`ChangegenConfig`].

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::ChangegenConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads configuration from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files,
    /// `CHANGEGEN__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ChangegenConfig, ApiError> {
        let changeset_dir = Self::changeset_dir(workspace_root)?;
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root, &changeset_dir)?;
        let builder = environment::add_to_builder(builder);

        let config: ChangegenConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Self::validated(config)
    }

    /// `changeset.dir` as set by every layer except the files inside that directory.
    fn changeset_dir(workspace_root: &Path) -> Result<PathBuf, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_root_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);
        Ok(builder.build()?.get::<PathBuf>("changeset.dir")?)
    }

    /// Load configuration from a single file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<ChangegenConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config: ChangegenConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Self::validated(config)
    }

    fn validated(config: ChangegenConfig) -> Result<ChangegenConfig, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
