//! Package discovery: walks the workspace for `package.json` manifests.

use super::manifest::{read_manifest, DEPENDENCY_FIELDS};
use super::{Package, Workspace};
use crate::config::WorkspaceConfig;
use crate::error::WorkspaceError;
use semver::Version;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

const MANIFEST_FILE: &str = "package.json";

/// Find every package under `root`.
///
/// Directories named in `config.ignore_dirs` are pruned. Manifests without a `name`
/// or `version` are skipped; the root manifest is skipped unless
/// `config.include_root` is set. Duplicate package names are an error.
pub fn discover_packages(root: &Path, config: &WorkspaceConfig) -> Result<Workspace, WorkspaceError> {
    let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let mut packages = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .max_depth(config.max_depth.unwrap_or(usize::MAX))
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !should_skip(entry, &config.ignore_dirs));

    for entry in walker {
        let entry = entry.map_err(|e| WorkspaceError::Walk(e.to_string()))?;
        if !entry.file_type().is_file() || entry.file_name() != MANIFEST_FILE {
            continue;
        }

        let manifest_path = entry.path().to_path_buf();
        let dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.clone());
        if dir == root && !config.include_root {
            debug!(path = %manifest_path.display(), "Skipping root manifest");
            continue;
        }

        let Some(package) = load_package(&manifest_path, dir)? else {
            continue;
        };

        if let Some(first) = seen.get(&package.name) {
            return Err(WorkspaceError::DuplicatePackage {
                name: package.name,
                first: first.clone(),
                second: manifest_path,
            });
        }
        seen.insert(package.name.clone(), manifest_path);
        packages.push(package);
    }

    debug!(count = packages.len(), root = %root.display(), "Packages discovered");
    Ok(Workspace::new(root, packages))
}

fn should_skip(entry: &DirEntry, ignore_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && ignore_dirs
            .iter()
            .any(|ignored| entry.file_name().to_string_lossy() == ignored.as_str())
}

fn load_package(manifest_path: &Path, dir: PathBuf) -> Result<Option<Package>, WorkspaceError> {
    let manifest = read_manifest(manifest_path)?;

    let Some(name) = manifest.get("name").and_then(|v| v.as_str()) else {
        debug!(path = %manifest_path.display(), "Manifest has no name; skipping");
        return Ok(None);
    };
    let Some(raw_version) = manifest.get("version").and_then(|v| v.as_str()) else {
        warn!(package = name, "Manifest has no version; skipping");
        return Ok(None);
    };
    let version = Version::parse(raw_version).map_err(|e| WorkspaceError::InvalidVersion {
        package: name.to_string(),
        version: raw_version.to_string(),
        message: e.to_string(),
    })?;

    let mut dependencies = BTreeMap::new();
    for field in DEPENDENCY_FIELDS {
        if let Some(table) = manifest.get(*field).and_then(|v| v.as_object()) {
            for (dep, spec) in table {
                if let Some(spec) = spec.as_str() {
                    dependencies
                        .entry(dep.clone())
                        .or_insert_with(|| spec.to_string());
                }
            }
        }
    }

    Ok(Some(Package {
        name: name.to_string(),
        version,
        dir,
        manifest_path: manifest_path.to_path_buf(),
        private: manifest
            .get("private")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        dependencies,
    }))
}
