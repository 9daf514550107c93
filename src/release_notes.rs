//! Cross-package release notes grouped by changelog section.

use crate::changeset::Changeset;
use crate::config::SectionConfig;
use crate::plan::ReleasePlan;
use std::collections::HashMap;

/// Release notes rendering options.
#[derive(Debug, Clone)]
pub struct ReleaseNotesOptions {
    pub heading: String,
    pub version: Option<String>,
    pub default_section: String,
}

/// GitHub-style heading anchor.
pub fn anchor(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Anchors for headings in document order. A repeated slug gets `-1`, `-2` and
/// so on, as GitHub numbers them.
#[derive(Default)]
struct Anchors {
    seen: HashMap<String, usize>,
}

impl Anchors {
    fn next(&mut self, title: &str) -> String {
        let base = anchor(title);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

struct NoteItem<'a> {
    changeset: &'a Changeset,
    packages: Vec<&'a str>,
}

/// Render release notes for every changeset in `plan`.
///
/// Each changeset appears once, in its section (unknown or missing sections use the
/// default section). Highlighted changesets lead their section. Changesets that opt
/// out of release notes, or release nothing, are left out.
pub fn render_release_notes(
    plan: &ReleasePlan,
    sections: &[SectionConfig],
    options: &ReleaseNotesOptions,
) -> String {
    let mut grouped: Vec<(&SectionConfig, Vec<NoteItem>)> =
        sections.iter().map(|s| (s, Vec::new())).collect();
    let default_index = sections
        .iter()
        .position(|s| s.name == options.default_section)
        .unwrap_or(sections.len().saturating_sub(1));

    for changeset in &plan.changesets {
        if !changeset.metadata.include_in_release_notes {
            continue;
        }
        let packages: Vec<&str> = changeset
            .releases
            .keys()
            .map(String::as_str)
            .filter(|name| plan.release(name).is_some())
            .collect();
        if packages.is_empty() {
            continue;
        }
        let section = changeset.section_or(&options.default_section);
        let index = sections
            .iter()
            .position(|s| s.name == section)
            .unwrap_or(default_index);
        if let Some((_, items)) = grouped.get_mut(index) {
            items.push(NoteItem { changeset, packages });
        }
    }

    for (_, items) in grouped.iter_mut() {
        items.sort_by(|a, b| {
            b.changeset
                .metadata
                .highlight
                .cmp(&a.changeset.metadata.highlight)
                .then_with(|| a.changeset.id.cmp(&b.changeset.id))
        });
    }
    grouped.retain(|(_, items)| !items.is_empty());

    let title = match &options.version {
        Some(version) => format!("{} v{}", options.heading, version),
        None => options.heading.clone(),
    };
    let mut out = format!("# {}\n", title);

    if grouped.is_empty() {
        out.push_str("\nNo changes in this release.\n");
        return out;
    }

    let mut anchors = Anchors::default();
    anchors.next(&title);
    anchors.next("Contents");
    let links: Vec<(String, Vec<String>)> = grouped
        .iter()
        .map(|(section, items)| {
            let section_anchor = anchors.next(&section.title);
            let item_anchors = items
                .iter()
                .map(|item| {
                    let slug = anchors.next(item.changeset.display_title());
                    anchors.next("Change details");
                    slug
                })
                .collect();
            (section_anchor, item_anchors)
        })
        .collect();

    out.push_str("\n## Contents\n\n");
    for ((section, items), (section_anchor, item_anchors)) in grouped.iter().zip(&links) {
        out.push_str(&format!("- [{}](#{})\n", section.title, section_anchor));
        for (item, item_anchor) in items.iter().zip(item_anchors) {
            out.push_str(&format!(
                "    - [{}](#{})\n",
                item.changeset.display_title(),
                item_anchor
            ));
        }
    }

    for (section, items) in &grouped {
        out.push_str(&format!("\n## {}\n", section.title));
        for item in items {
            out.push_str(&format!("\n### {}\n\n", item.changeset.display_title()));
            if !item.changeset.body.is_empty() {
                out.push_str(&item.changeset.body);
                out.push_str("\n\n");
            }
            out.push_str("#### Change details\n\nAffected packages:\n\n");
            for package in &item.packages {
                out.push_str(&format!("- {}\n", package));
            }
        }
    }

    out
}
