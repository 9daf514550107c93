//! Merge rules: defaults, override order, conflict handling.
//!
//! Scalar defaults are registered here so that partial files and environment
//! overrides merge over a complete base. List-valued settings (sections, ignore
//! dirs) take their defaults from serde and are replaced wholesale by any layer
//! that sets them.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("changeset.dir", ".changeset")?
        .set_default("changeset.require_section", false)?
        .set_default("changeset.default_section", "other")?
        .set_default("changelog.file_name", "CHANGELOG.md")?
        .set_default("changelog.version_header", "## {version}")?
        .set_default("changelog.dependency_only_text", "Dependency updates only.")?
        .set_default("release.unknown_packages", "error")?
        .set_default("release.internal_dependents", "patch")
}
