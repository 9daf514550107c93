//! Status command presentation: the release plan as a table or json.

use super::shared::{format_section_heading, to_json};
use crate::error::ApiError;
use crate::plan::ReleasePlan;
use comfy_table::Table;
use serde_json::json;

pub fn format_status_text(plan: &ReleasePlan, color: bool) -> String {
    if plan.is_empty() {
        return "No pending changesets.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Pending Releases", color)));
    if plan.releases.is_empty() {
        out.push_str("No packages will be released.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Package", "Current", "Next", "Bump", "Reason", "Changesets"]);
        for r in &plan.releases {
            table.add_row(vec![
                r.name.clone(),
                r.current.to_string(),
                r.next.to_string(),
                r.bump.to_string(),
                r.reason.to_string(),
                r.changesets.len().to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    out.push_str(&format!("\n{} changeset(s) pending", plan.changesets.len()));
    if !plan.warnings.is_empty() {
        out.push_str(&format!("\n\nWarnings ({}):", plan.warnings.len()));
        for w in &plan.warnings {
            out.push_str(&format!("\n  - {}", w));
        }
    }
    out
}

pub fn format_status_json(plan: &ReleasePlan) -> Result<String, ApiError> {
    let changesets: Vec<_> = plan
        .changesets
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "title": c.title,
                "section": c.metadata.section,
                "releases": c.releases,
            })
        })
        .collect();
    to_json(&json!({
        "releases": plan.releases,
        "changesets": changesets,
        "warnings": plan.warnings,
    }))
}
