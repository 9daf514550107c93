//! Shared presentation helpers: headings, severity colors and JSON rendering.

use crate::changeset::Severity;
use crate::error::ApiError;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

/// Whether stdout output should be colored. Respects NO_COLOR and TTY.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Severity label, red for errors and yellow for warnings when colored.
pub fn severity_label(severity: Severity, color: bool) -> String {
    let label = match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match (severity, color) {
        (Severity::Error, true) => label.red().bold().to_string(),
        (Severity::Warning, true) => label.yellow().to_string(),
        (_, false) => label.to_string(),
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(ApiError::from)
}
