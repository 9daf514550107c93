//! Applying a release plan: manifests, changelogs and consumed changesets.

use crate::changelog::{read_changelog, render_entry, updated_changelog};
use crate::changeset::ChangesetStore;
use crate::config::ChangegenConfig;
use crate::error::ApiError;
use crate::plan::ReleasePlan;
use crate::workspace::{updated_manifest, write_manifest, Workspace};
use semver::Version;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for [`apply_plan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionOptions {
    pub dry_run: bool,
    pub keep_changesets: bool,
}

/// Files touched by [`apply_plan`] (or that would be, on a dry run).
#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionReport {
    pub manifests: Vec<PathBuf>,
    pub changelogs: Vec<PathBuf>,
    pub removed_changesets: Vec<PathBuf>,
    pub dry_run: bool,
}

impl VersionReport {
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty() && self.changelogs.is_empty() && self.removed_changesets.is_empty()
    }
}

/// Write the release described by `plan` into the workspace.
pub fn apply_plan(
    workspace: &Workspace,
    plan: &ReleasePlan,
    config: &ChangegenConfig,
    options: VersionOptions,
) -> Result<VersionReport, ApiError> {
    let mut report = VersionReport {
        dry_run: options.dry_run,
        ..VersionReport::default()
    };
    if plan.is_empty() {
        return Ok(report);
    }

    // Every changelog and manifest text is computed before anything is written.
    let next_versions = plan.next_versions();
    let mut manifests = Vec::new();
    for package in &workspace.packages {
        let own = plan.release(&package.name).map(|r| &r.next);
        let dependency_versions: BTreeMap<String, Version> = next_versions
            .iter()
            .filter(|(name, _)| package.dependencies.contains_key(*name))
            .map(|(name, version)| (name.clone(), version.clone()))
            .collect();
        if own.is_none() && dependency_versions.is_empty() {
            continue;
        }
        if let Some(text) = updated_manifest(package, own, &dependency_versions)? {
            manifests.push((package, text));
        }
    }

    let mut changelogs = Vec::new();
    for release in &plan.releases {
        let Some(package) = workspace.get(&release.name) else {
            continue;
        };
        let entry = render_entry(
            release,
            &plan.changesets_for(release),
            &config.changelog,
            &config.sections,
            &config.changeset.default_section,
        );
        let path = package.changelog_path(&config.changelog.file_name);
        let text = updated_changelog(&read_changelog(&path)?, &package.name, &entry, &config.changelog);
        info!(
            package = %release.name,
            bump = %release.bump,
            current = %release.current,
            next = %release.next,
            "Package released"
        );
        changelogs.push((path, text));
    }

    for (package, text) in manifests {
        if !options.dry_run {
            write_manifest(package, &text)?;
        }
        report.manifests.push(package.manifest_path.clone());
    }
    for (path, text) in changelogs {
        if !options.dry_run {
            std::fs::write(&path, text).map_err(|e| ApiError::io(&path, e))?;
            debug!(path = %path.display(), "Changelog updated");
        }
        report.changelogs.push(path);
    }

    if !options.keep_changesets {
        let store = ChangesetStore::new(workspace.root.join(&config.changeset.dir));
        for changeset in &plan.changesets {
            if !options.dry_run {
                store.remove(changeset)?;
            }
            report.removed_changesets.push(changeset.path.clone());
        }
    }

    info!(
        manifests = report.manifests.len(),
        changelogs = report.changelogs.len(),
        changesets = report.removed_changesets.len(),
        dry_run = options.dry_run,
        "Release applied"
    );
    Ok(report)
}
