//! Per-package `CHANGELOG.md` generation.
//!
//! New entries go directly under the `# <package>` title, above earlier releases.
//! Every write runs [`cleanup`] so empty sections never accumulate.

pub mod cleanup;
pub mod render;

pub use cleanup::{cleanup, find_empty_sections};
pub use render::{render_entry, version_header};

use crate::config::ChangelogConfig;
use crate::error::ApiError;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Insert `entry` above the first `##` release header in `existing`.
///
/// An empty changelog starts with a `# <package>` title; a changelog without a
/// release header gets the entry appended.
pub fn insert_entry(existing: &str, package: &str, entry: &str) -> String {
    let entry = entry.trim_end();
    if existing.trim().is_empty() {
        return format!("# {}\n\n{}\n", package, entry);
    }

    let mut offset = 0;
    for line in existing.split_inclusive('\n') {
        if line.starts_with("## ") {
            let (before, after) = existing.split_at(offset);
            return format!("{}{}\n\n{}", before, entry, after);
        }
        offset += line.len();
    }

    format!("{}\n\n{}\n", existing.trim_end(), entry)
}

/// Changelog text after adding `entry` for `package`.
pub fn updated_changelog(existing: &str, package: &str, entry: &str, config: &ChangelogConfig) -> String {
    cleanup(&insert_entry(existing, package, entry), &config.dependency_only_text)
}

/// Changelog text at `path`; a missing file reads as empty.
pub fn read_changelog(path: &Path) -> Result<String, ApiError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ApiError::io(path, e)),
    }
}

/// Read the changelog at `path` (missing means empty), add `entry` and write it back.
pub fn update_changelog(
    path: &Path,
    package: &str,
    entry: &str,
    config: &ChangelogConfig,
) -> Result<(), ApiError> {
    let existing = read_changelog(path)?;
    let updated = updated_changelog(&existing, package, entry, config);
    std::fs::write(path, updated).map_err(|e| ApiError::io(path, e))?;
    debug!(package = %package, path = %path.display(), "Changelog updated");
    Ok(())
}

/// Rename release headers `## <from>` (optionally `v`-prefixed) to `## <to>`.
///
/// Returns the new text and the number of headers replaced.
pub fn replace_version_headers(text: &str, from: &str, to: &str) -> (String, usize) {
    let pattern = format!(r"(?m)^(#{{2,3}}[ \t]+)v?{}[ \t]*$", regex::escape(from));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return (text.to_string(), 0),
    };
    let count = re.find_iter(text).count();
    let replaced = re.replace_all(text, |caps: &regex::Captures| format!("{}{}", &caps[1], to));
    (replaced.into_owned(), count)
}
