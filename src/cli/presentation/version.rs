//! Version command presentation.

use crate::version::VersionReport;
use std::path::{Path, PathBuf};

fn push_paths(output: &mut String, label: &str, paths: &[PathBuf], root: &Path) {
    if paths.is_empty() {
        return;
    }
    output.push_str(&format!("{} ({}):\n", label, paths.len()));
    for path in paths {
        let shown = path.strip_prefix(root).unwrap_or(path);
        output.push_str(&format!("  {}\n", shown.display()));
    }
}

pub fn format_version_report(report: &VersionReport, root: &Path) -> String {
    if report.is_empty() {
        return "No pending changesets; nothing to version.".to_string();
    }
    let mut output = String::new();
    if report.dry_run {
        output.push_str("Dry run: no files were written.\n\n");
    }
    let (manifests, changelogs, removed) = if report.dry_run {
        ("Would update manifests", "Would update changelogs", "Would remove changesets")
    } else {
        ("Updated manifests", "Updated changelogs", "Removed changesets")
    };
    push_paths(&mut output, manifests, &report.manifests, root);
    push_paths(&mut output, changelogs, &report.changelogs, root);
    push_paths(&mut output, removed, &report.removed_changesets, root);
    output.trim_end().to_string()
}
