//! Init command presentation.

use crate::init::InitSummary;
use std::path::Path;

pub fn format_init_summary(summary: &InitSummary, root: &Path, force: bool) -> String {
    let relative = |p: &Path| p.strip_prefix(root).unwrap_or(p).display().to_string();
    let mut output = format!(
        "Initialized changeset directory: {}\n",
        relative(&summary.changeset_dir)
    );
    for path in &summary.files.created {
        if force {
            output.push_str(&format!("  ✓ {} (overwritten)\n", relative(path)));
        } else {
            output.push_str(&format!("  ✓ {}\n", relative(path)));
        }
    }
    for path in &summary.files.skipped {
        output.push_str(&format!("  ⊘ {} (already exists, skipped)\n", relative(path)));
    }
    for error in &summary.files.errors {
        output.push_str(&format!("  ✗ {}\n", error));
    }
    if !summary.files.skipped.is_empty() && !force {
        output.push_str("\nUse --force to overwrite existing files.\n");
    }
    output.trim_end().to_string()
}
