//! Configuration System
//!
//! Layered configuration for changeset handling, release planning and changelog
//! output. Defaults are merged with a global user file, workspace files and
//! `CHANGEGEN__*` environment variables by [`ConfigLoader`].

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_paths, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangegenConfig {
    /// Changeset directory and authoring rules
    #[serde(default)]
    pub changeset: ChangesetConfig,

    /// Changelog sections, in display order
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,

    /// Release planning rules
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Per-package changelog output
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Aggregated release notes output
    #[serde(default)]
    pub release_notes: ReleaseNotesConfig,

    /// Package discovery
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ChangegenConfig {
    fn default() -> Self {
        Self {
            changeset: ChangesetConfig::default(),
            sections: default_sections(),
            release: ReleaseConfig::default(),
            changelog: ChangelogConfig::default(),
            release_notes: ReleaseNotesConfig::default(),
            workspace: WorkspaceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Changeset directory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangesetConfig {
    /// Directory holding changeset files, relative to the workspace root
    #[serde(default = "default_changeset_dir")]
    pub dir: PathBuf,

    /// Reject changesets without a section
    #[serde(default)]
    pub require_section: bool,

    /// Section used for changesets that do not name one
    #[serde(default = "default_section_name")]
    pub default_section: String,
}

fn default_changeset_dir() -> PathBuf {
    PathBuf::from(".changeset")
}

fn default_section_name() -> String {
    "other".to_string()
}

impl Default for ChangesetConfig {
    fn default() -> Self {
        Self {
            dir: default_changeset_dir(),
            require_section: false,
            default_section: default_section_name(),
        }
    }
}

/// A changelog category such as `feature` or `fix`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub title: String,
}

impl SectionConfig {
    fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
        }
    }
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("breaking", "Breaking Changes"),
        SectionConfig::new("feature", "New Features"),
        SectionConfig::new("tree", "Tree Changes"),
        SectionConfig::new("fix", "Bug Fixes"),
        SectionConfig::new("deprecation", "Deprecations"),
        SectionConfig::new("legacy", "Legacy API Changes"),
        SectionConfig::new("other", "Other Changes"),
    ]
}

/// What to do when a changeset names a package that is not in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPackagePolicy {
    #[default]
    Error,
    Warn,
    Ignore,
}

/// Bump applied to packages whose internal dependencies are released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DependentBump {
    #[default]
    Patch,
    None,
}

/// Packages that always release together with one shared version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedGroup {
    pub name: String,
    /// Package names or `prefix*` patterns
    pub packages: Vec<String>,
}

impl FixedGroup {
    pub fn contains(&self, package: &str) -> bool {
        self.packages.iter().any(|p| package_matches(p, package))
    }
}

/// Match a package name against an exact name or a trailing-`*` prefix pattern.
pub fn package_matches(pattern: &str, package: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => package.starts_with(prefix),
        None => pattern == package,
    }
}

/// Release planning settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub fixed: Vec<FixedGroup>,

    /// Packages (names or patterns) that are never released
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub unknown_packages: UnknownPackagePolicy,

    #[serde(default)]
    pub internal_dependents: DependentBump,
}

impl ReleaseConfig {
    pub fn is_ignored(&self, package: &str) -> bool {
        self.ignore.iter().any(|p| package_matches(p, package))
    }
}

/// Per-package changelog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_file")]
    pub file_name: String,

    /// Header template; supports `{version}` and `{package}`
    #[serde(default = "default_version_header")]
    pub version_header: String,

    /// Line written for releases that carry no changesets
    #[serde(default = "default_dependency_only_text")]
    pub dependency_only_text: String,
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_version_header() -> String {
    "## {version}".to_string()
}

fn default_dependency_only_text() -> String {
    "Dependency updates only.".to_string()
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file_name: default_changelog_file(),
            version_header: default_version_header(),
            dependency_only_text: default_dependency_only_text(),
        }
    }
}

/// Release notes settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNotesConfig {
    #[serde(default = "default_release_notes_heading")]
    pub heading: String,
}

fn default_release_notes_heading() -> String {
    "Release Notes".to_string()
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        Self {
            heading: default_release_notes_heading(),
        }
    }
}

/// Package discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory names never descended into
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    /// Maximum walk depth (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Treat the root `package.json` as a releasable package
    #[serde(default)]
    pub include_root: bool,
}

fn default_ignore_dirs() -> Vec<String> {
    ["node_modules", ".git", "target", "dist", "lib"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: default_ignore_dirs(),
            max_depth: None,
            include_root: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Section(String),
    Release(String),
    Changelog(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Section(msg) => write!(f, "Sections: {}", msg),
            ValidationError::Release(msg) => write!(f, "Release: {}", msg),
            ValidationError::Changelog(msg) => write!(f, "Changelog: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ChangegenConfig {
    /// Look up a configured section by name.
    pub fn section(&self, name: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.sections.is_empty() {
            errors.push(ValidationError::Section(
                "at least one section must be configured".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.name.trim().is_empty() {
                errors.push(ValidationError::Section("section name cannot be empty".to_string()));
            }
            if !seen.insert(section.name.as_str()) {
                errors.push(ValidationError::Section(format!(
                    "duplicate section '{}'",
                    section.name
                )));
            }
        }
        if !self.sections.is_empty() && self.section(&self.changeset.default_section).is_none() {
            errors.push(ValidationError::Section(format!(
                "default section '{}' is not a configured section",
                self.changeset.default_section
            )));
        }

        for group in &self.release.fixed {
            if group.packages.is_empty() {
                errors.push(ValidationError::Release(format!(
                    "fixed group '{}' has no packages",
                    group.name
                )));
            }
        }

        if self.changelog.file_name.trim().is_empty() {
            errors.push(ValidationError::Changelog(
                "file_name cannot be empty".to_string(),
            ));
        }
        if !self.changelog.version_header.contains("{version}") {
            errors.push(ValidationError::Changelog(
                "version_header must contain '{version}'".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
