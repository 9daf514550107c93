//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
/// A failed check prints its report ahead of the summary line.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ValidationFailed { report, .. } if !report.is_empty() => {
            format!("{}\n\n{}", report.trim_end(), e)
        }
        _ => e.to_string(),
    }
}
