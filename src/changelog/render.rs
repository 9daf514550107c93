//! Changelog entry rendering for one package release.

use crate::changeset::{BumpType, Changeset};
use crate::config::{ChangelogConfig, SectionConfig};
use crate::plan::PackageRelease;
use chrono::Utc;

/// Render the version header for `release` from the configured template.
///
/// Placeholders: `{version}`, `{package}` and `{date}` (UTC, `YYYY-MM-DD`).
pub fn version_header(release: &PackageRelease, config: &ChangelogConfig) -> String {
    let mut header = config
        .version_header
        .replace("{version}", &release.next.to_string())
        .replace("{package}", &release.name);
    if header.contains("{date}") {
        header = header.replace("{date}", &Utc::now().format("%Y-%m-%d").to_string());
    }
    header
}

/// Render the changelog entry for a release.
///
/// Changesets are grouped under `### Major|Minor|Patch Changes` by the bump they
/// gave this package, ordered by section then id within a group. A release with no
/// changesets gets the dependency-only line.
pub fn render_entry(
    release: &PackageRelease,
    changesets: &[&Changeset],
    config: &ChangelogConfig,
    sections: &[SectionConfig],
    default_section: &str,
) -> String {
    let mut out = version_header(release, config);
    out.push_str("\n\n");

    if release.changesets.is_empty() {
        out.push_str(&config.dependency_only_text);
        out.push('\n');
        return out;
    }

    for bump in BumpType::DESCENDING {
        let mut group: Vec<&Changeset> = release
            .changesets
            .iter()
            .filter(|r| r.bump == bump)
            .filter_map(|r| changesets.iter().copied().find(|c| c.id == r.id))
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by_key(|c| (section_rank(c.section_or(default_section), sections), c.id.clone()));

        out.push_str(&format!("### {}\n\n", bump.heading()));
        for changeset in group {
            out.push_str(&render_item(changeset));
            out.push('\n');
        }
    }

    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn section_rank(section: &str, sections: &[SectionConfig]) -> usize {
    sections
        .iter()
        .position(|s| s.name == section)
        .unwrap_or(sections.len())
}

/// One list item: `-   Title`, then the body indented under it.
fn render_item(changeset: &Changeset) -> String {
    let mut item = format!("-   {}\n", changeset.display_title());
    if !changeset.body.is_empty() {
        item.push('\n');
        for line in changeset.body.lines() {
            if line.trim().is_empty() {
                item.push('\n');
            } else {
                item.push_str("    ");
                item.push_str(line);
                item.push('\n');
            }
        }
    }
    item
}
