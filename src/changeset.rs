//! Changesets: markdown files that record an intended release.
//!
//! A changeset names one or more packages with a semver bump in its YAML frontmatter,
//! optionally carries metadata (changelog section, release-note flags), and holds a
//! markdown title and description that end up in changelogs and release notes.

pub mod bump;
pub mod lint;
pub mod parse;
pub mod slug;
pub mod store;

pub use bump::{bump_version, BumpType};
pub use lint::{error_count, lint, Diagnostic, Severity};
pub use parse::parse_changeset;
pub use slug::changeset_slug;
pub use store::ChangesetStore;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Metadata carried alongside the package bumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangesetMetadata {
    pub section: Option<String>,
    pub highlight: bool,
    pub include_in_release_notes: bool,
    /// Unrecognized metadata keys, verbatim
    pub extra: BTreeMap<String, String>,
}

impl Default for ChangesetMetadata {
    fn default() -> Self {
        Self {
            section: None,
            highlight: false,
            include_in_release_notes: true,
            extra: BTreeMap::new(),
        }
    }
}

/// A parsed changeset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Changeset {
    /// File stem, e.g. `brave-owls-sing`
    pub id: String,
    pub path: PathBuf,
    pub releases: BTreeMap<String, BumpType>,
    pub metadata: ChangesetMetadata,
    pub title: String,
    pub body: String,
}

impl Changeset {
    /// Section name, falling back to `default` when the changeset has none.
    pub fn section_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.metadata.section.as_deref().unwrap_or(default)
    }

    /// A changeset with no package releases.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Title for display; falls back to the id for untitled changesets.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Content of a changeset yet to be written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewChangeset {
    pub releases: BTreeMap<String, BumpType>,
    pub metadata: ChangesetMetadata,
    pub title: String,
    pub body: String,
}

impl NewChangeset {
    /// Canonical file rendering: one frontmatter block with quoted keys, then the
    /// title and body.
    ///
    /// A body without a title reads back with its first line as the title, so
    /// `add` refuses to write one.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        for (package, bump) in &self.releases {
            out.push_str(&format!("{}: {}\n", quote(package), bump));
        }
        if let Some(section) = &self.metadata.section {
            out.push_str(&format!("\"__section\": {}\n", quote(section)));
        }
        if self.metadata.highlight {
            out.push_str("\"__highlight\": true\n");
        }
        if !self.metadata.include_in_release_notes {
            out.push_str("\"__includeInReleaseNotes\": false\n");
        }
        for (key, value) in &self.metadata.extra {
            out.push_str(&format!("{}: {}\n", quote(&format!("__{}", key)), quote(value)));
        }
        out.push_str("---\n");

        let title = self.title.trim();
        let body = self.body.trim();
        if !title.is_empty() {
            out.push('\n');
            out.push_str(title);
            out.push('\n');
        }
        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }
        out
    }
}

impl From<&Changeset> for NewChangeset {
    fn from(changeset: &Changeset) -> Self {
        Self {
            releases: changeset.releases.clone(),
            metadata: changeset.metadata.clone(),
            title: changeset.title.clone(),
            body: changeset.body.clone(),
        }
    }
}

/// Canonical text of an existing changeset.
pub fn render_changeset(changeset: &Changeset) -> String {
    NewChangeset::from(changeset).render()
}

/// Double-quoted YAML scalar. JSON string syntax is a subset of YAML's.
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
