//! Error types for changeset parsing, workspace discovery and release commands.

use std::path::PathBuf;
use thiserror::Error;

/// Changeset file format errors
#[derive(Debug, Error)]
pub enum ChangesetError {
    #[error("{path}: missing frontmatter (file must start with '---')")]
    MissingFrontmatter { path: PathBuf },

    #[error("{path}: frontmatter block is not terminated by '---'")]
    UnterminatedFrontmatter { path: PathBuf },

    #[error("{path}: invalid frontmatter: {message}")]
    InvalidYaml { path: PathBuf, message: String },

    #[error("{path}: invalid bump type '{value}' for package '{package}' (must be major, minor or patch)")]
    InvalidBump {
        path: PathBuf,
        package: String,
        value: String,
    },

    #[error("{path}: invalid metadata '{key}': {message}")]
    InvalidMetadata {
        path: PathBuf,
        key: String,
        message: String,
    },

    #[error("{path}: file is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },

    #[error("Changeset I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Package discovery and manifest errors
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Package '{package}' has invalid version '{version}': {message}")]
    InvalidVersion {
        package: String,
        version: String,
        message: String,
    },

    #[error("Duplicate package '{name}' in {first} and {second}")]
    DuplicatePackage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk workspace: {0}")]
    Walk(String),
}

/// Command-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Changeset(#[from] ChangesetError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Changeset '{changeset}' references unknown package '{package}'")]
    UnknownPackage { changeset: String, package: String },

    #[error("Changeset check failed with {errors} error(s)")]
    ValidationFailed { errors: usize, report: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}
