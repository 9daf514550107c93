//! Check command presentation: diagnostics as text or json.

use super::shared::{severity_label, to_json};
use crate::changeset::{Diagnostic, Severity};
use crate::error::ApiError;
use serde_json::json;
use std::path::Path;

pub fn format_check_text(
    diagnostics: &[Diagnostic],
    changeset_count: usize,
    root: &Path,
    color: bool,
) -> String {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    let mut output = String::new();
    for d in diagnostics {
        let path = d.path.strip_prefix(root).unwrap_or(&d.path);
        output.push_str(&format!(
            "{}: {}: {}\n",
            severity_label(d.severity, color),
            path.display(),
            d.message
        ));
    }
    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&format!(
        "Checked {} changeset(s): {} error(s), {} warning(s)",
        changeset_count, errors, warnings
    ));
    output
}

pub fn format_check_json(diagnostics: &[Diagnostic], changeset_count: usize) -> Result<String, ApiError> {
    to_json(&json!({
        "changesets": changeset_count,
        "diagnostics": diagnostics,
    }))
}
