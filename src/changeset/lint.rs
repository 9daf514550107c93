//! Changeset linting for `changegen check`.

use super::Changeset;
use crate::config::{ChangegenConfig, UnknownPackagePolicy};
use crate::error::ChangesetError;
use crate::workspace::Workspace;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding about one changeset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    fn error(path: &std::path::Path, message: String) -> Self {
        Self {
            severity: Severity::Error,
            path: path.to_path_buf(),
            message,
        }
    }

    fn warning(path: &std::path::Path, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.to_path_buf(),
            message,
        }
    }
}

/// Check parsed changesets against the workspace and configuration.
///
/// Diagnostics are ordered by severity, then path.
pub fn lint(
    changesets: &[Changeset],
    parse_failures: &[(PathBuf, ChangesetError)],
    workspace: &Workspace,
    config: &ChangegenConfig,
) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = parse_failures
        .iter()
        .map(|(path, e)| Diagnostic::error(path, e.to_string()))
        .collect();

    for changeset in changesets {
        let path = changeset.path.as_path();

        for package in changeset.releases.keys() {
            if config.release.is_ignored(package) {
                diagnostics.push(Diagnostic::warning(
                    path,
                    format!("package '{}' is ignored and will not be released", package),
                ));
            } else if !workspace.contains(package) {
                let message = format!("package '{}' is not in the workspace", package);
                match config.release.unknown_packages {
                    UnknownPackagePolicy::Error => diagnostics.push(Diagnostic::error(path, message)),
                    UnknownPackagePolicy::Warn => {
                        diagnostics.push(Diagnostic::warning(path, message))
                    }
                    UnknownPackagePolicy::Ignore => {}
                }
            }
        }

        match &changeset.metadata.section {
            Some(section) if config.section(section).is_none() => {
                let known: Vec<&str> = config.sections.iter().map(|s| s.name.as_str()).collect();
                diagnostics.push(Diagnostic::error(
                    path,
                    format!("unknown section '{}' (expected one of: {})", section, known.join(", ")),
                ));
            }
            None if config.changeset.require_section => {
                diagnostics.push(Diagnostic::error(path, "missing section".to_string()));
            }
            _ => {}
        }

        if changeset.title.is_empty() {
            let message = if changeset.is_empty() {
                "changeset has no releases and no title".to_string()
            } else {
                "missing title".to_string()
            };
            diagnostics.push(Diagnostic::warning(path, message));
        }
    }

    diagnostics.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.path.cmp(&b.path)));
    diagnostics
}

/// Count of error-severity diagnostics.
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count()
}
