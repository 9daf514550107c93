//! Release planning: turns changesets into per-package bumps and next versions.
//!
//! Bumps come from three places, applied until nothing changes:
//! changesets naming a package, internal dependents of released packages, and
//! fixed groups whose members always release together at one version.

use crate::changeset::{bump_version, BumpType, Changeset};
use crate::config::{DependentBump, FixedGroup, ReleaseConfig, UnknownPackagePolicy};
use crate::error::ApiError;
use crate::workspace::{rewrite_dependency_spec, Workspace};
use semver::Version;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Why a package is part of the release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    Changesets,
    FixedGroup(String),
    Dependent,
}

impl std::fmt::Display for ReleaseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseReason::Changesets => f.write_str("changesets"),
            ReleaseReason::FixedGroup(name) => write!(f, "fixed group '{}'", name),
            ReleaseReason::Dependent => f.write_str("dependency update"),
        }
    }
}

/// A changeset's contribution to one package release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangesetRef {
    pub id: String,
    pub bump: BumpType,
}

/// The planned release of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRelease {
    pub name: String,
    pub current: Version,
    pub next: Version,
    pub bump: BumpType,
    pub reason: ReleaseReason,
    pub changesets: Vec<ChangesetRef>,
}

/// Everything `version` will do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleasePlan {
    pub releases: Vec<PackageRelease>,
    /// Every changeset consumed by the release, sorted by id
    pub changesets: Vec<Changeset>,
    pub warnings: Vec<String>,
}

impl ReleasePlan {
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty() && self.changesets.is_empty()
    }

    pub fn release(&self, name: &str) -> Option<&PackageRelease> {
        self.releases.iter().find(|r| r.name == name)
    }

    /// The changesets behind a release, in plan order.
    pub fn changesets_for(&self, release: &PackageRelease) -> Vec<&Changeset> {
        release
            .changesets
            .iter()
            .filter_map(|r| self.changesets.iter().find(|c| c.id == r.id))
            .collect()
    }

    /// Released package name to next version.
    pub fn next_versions(&self) -> BTreeMap<String, Version> {
        self.releases
            .iter()
            .map(|r| (r.name.clone(), r.next.clone()))
            .collect()
    }
}

struct Pending {
    bump: BumpType,
    reason: ReleaseReason,
    changesets: Vec<ChangesetRef>,
}

/// Build the release plan for `changesets` against `workspace`.
pub fn assemble_plan(
    workspace: &Workspace,
    mut changesets: Vec<Changeset>,
    config: &ReleaseConfig,
) -> Result<ReleasePlan, ApiError> {
    changesets.sort_by(|a, b| a.id.cmp(&b.id));
    let mut warnings = Vec::new();
    let mut pending: BTreeMap<String, Pending> = BTreeMap::new();

    for changeset in &changesets {
        for (package, bump) in &changeset.releases {
            if config.is_ignored(package) {
                let message = format!(
                    "changeset '{}': package '{}' is ignored",
                    changeset.id, package
                );
                warn!(changeset = %changeset.id, package = %package, "Ignored package in changeset");
                warnings.push(message);
                continue;
            }
            if !workspace.contains(package) {
                match config.unknown_packages {
                    UnknownPackagePolicy::Error => {
                        return Err(ApiError::UnknownPackage {
                            changeset: changeset.id.clone(),
                            package: package.clone(),
                        });
                    }
                    UnknownPackagePolicy::Warn => {
                        warn!(changeset = %changeset.id, package = %package, "Unknown package in changeset");
                        warnings.push(format!(
                            "changeset '{}': package '{}' is not in the workspace",
                            changeset.id, package
                        ));
                    }
                    UnknownPackagePolicy::Ignore => {}
                }
                continue;
            }

            let entry = pending.entry(package.clone()).or_insert(Pending {
                bump: *bump,
                reason: ReleaseReason::Changesets,
                changesets: Vec::new(),
            });
            entry.bump = entry.bump.max(*bump);
            entry.changesets.push(ChangesetRef {
                id: changeset.id.clone(),
                bump: *bump,
            });
        }
    }

    loop {
        let mut changed = false;
        if config.internal_dependents == DependentBump::Patch {
            changed |= add_dependents(workspace, config, &mut pending);
        }
        for group in &config.fixed {
            changed |= align_fixed_group(workspace, config, group, &mut pending);
        }
        if !changed {
            break;
        }
    }

    let mut releases = Vec::with_capacity(pending.len());
    for (name, p) in pending {
        let Some(package) = workspace.get(&name) else {
            continue;
        };
        let base = match config.fixed.iter().find(|g| g.contains(&name)) {
            Some(group) => group_base_version(workspace, config, group),
            None => package.version.clone(),
        };
        let next = bump_version(&base, p.bump);
        debug!(package = %name, bump = %p.bump, current = %package.version, next = %next, "Planned release");
        releases.push(PackageRelease {
            name,
            current: package.version.clone(),
            next,
            bump: p.bump,
            reason: p.reason,
            changesets: p.changesets,
        });
    }

    Ok(ReleasePlan {
        releases,
        changesets,
        warnings,
    })
}

/// Release, as a patch, every package that depends on a released package through a
/// spec that will be rewritten. Returns whether anything was added.
fn add_dependents(
    workspace: &Workspace,
    config: &ReleaseConfig,
    pending: &mut BTreeMap<String, Pending>,
) -> bool {
    let mut added = Vec::new();
    for package in &workspace.packages {
        if pending.contains_key(&package.name) || config.is_ignored(&package.name) {
            continue;
        }
        let depends_on_release = package.dependencies.iter().any(|(dep, spec)| {
            pending.contains_key(dep)
                && workspace
                    .get(dep)
                    .map(|d| rewrite_dependency_spec(spec, &d.version).is_some())
                    .unwrap_or(false)
        });
        if depends_on_release {
            added.push(package.name.clone());
        }
    }

    for name in &added {
        pending.insert(
            name.clone(),
            Pending {
                bump: BumpType::Patch,
                reason: ReleaseReason::Dependent,
                changesets: Vec::new(),
            },
        );
    }
    !added.is_empty()
}

/// Raise every member of a fixed group to the group's largest bump once any member
/// releases. Returns whether anything changed.
fn align_fixed_group(
    workspace: &Workspace,
    config: &ReleaseConfig,
    group: &FixedGroup,
    pending: &mut BTreeMap<String, Pending>,
) -> bool {
    let members: Vec<&str> = workspace
        .packages
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| group.contains(name) && !config.is_ignored(name))
        .collect();

    let Some(max) = members
        .iter()
        .filter_map(|name| pending.get(*name).map(|p| p.bump))
        .max()
    else {
        return false;
    };

    let mut changed = false;
    for name in members {
        match pending.get_mut(name) {
            Some(p) if p.bump >= max => {}
            Some(p) => {
                p.bump = max;
                if p.reason == ReleaseReason::Dependent {
                    p.reason = ReleaseReason::FixedGroup(group.name.clone());
                }
                changed = true;
            }
            None => {
                pending.insert(
                    name.to_string(),
                    Pending {
                        bump: max,
                        reason: ReleaseReason::FixedGroup(group.name.clone()),
                        changesets: Vec::new(),
                    },
                );
                changed = true;
            }
        }
    }
    changed
}

/// Highest current version among a fixed group's members.
fn group_base_version(workspace: &Workspace, config: &ReleaseConfig, group: &FixedGroup) -> Version {
    workspace
        .packages
        .iter()
        .filter(|p| group.contains(&p.name) && !config.is_ignored(&p.name))
        .map(|p| p.version.clone())
        .max()
        .unwrap_or_else(|| Version::new(0, 0, 0))
}
