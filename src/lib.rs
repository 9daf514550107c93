//! Changegen: changeset-driven release tooling
//!
//! Contributors record intended releases as markdown changesets. Changegen checks
//! them against the workspace, plans per-package version bumps, writes package
//! changelogs and renders cross-package release notes.

pub mod changelog;
pub mod changeset;
pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod plan;
pub mod release_notes;
pub mod version;
pub mod workspace;
