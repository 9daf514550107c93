//! `package.json` reading and in-place version updates.

use super::Package;
use crate::error::WorkspaceError;
use regex::Regex;
use semver::Version;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Manifest tables that hold dependency specs, in lookup order.
pub const DEPENDENCY_FIELDS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Read a manifest as an ordered JSON object.
pub fn read_manifest(path: &Path) -> Result<Map<String, Value>, WorkspaceError> {
    let text = std::fs::read_to_string(path).map_err(|source| WorkspaceError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(WorkspaceError::ManifestParse {
            path: path.to_path_buf(),
            message: "manifest must be a JSON object".to_string(),
        }),
        Err(e) => Err(WorkspaceError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

fn spec_regex() -> &'static Regex {
    static SPEC: OnceLock<Regex> = OnceLock::new();
    SPEC.get_or_init(|| {
        Regex::new(r"^(workspace:)?(\^|~|>=|=)?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)$")
            .expect("dependency spec regex is valid")
    })
}

/// Point a pinned or ranged dependency spec at `new_version`, keeping its prefix.
///
/// Returns `None` for specs that do not carry a concrete version (`*`,
/// `workspace:^`, dist tags, paths, complex ranges); those never need rewriting.
pub fn rewrite_dependency_spec(spec: &str, new_version: &Version) -> Option<String> {
    let caps = spec_regex().captures(spec.trim())?;
    let protocol = caps.get(1).map_or("", |m| m.as_str());
    let operator = caps.get(2).map_or("", |m| m.as_str());
    Some(format!("{}{}{}", protocol, operator, new_version))
}

/// Updated manifest text for `package`, or `None` when nothing changes.
///
/// `new_version` replaces the package's own version; `dependency_versions` maps
/// released dependency names to their new versions.
pub fn updated_manifest(
    package: &Package,
    new_version: Option<&Version>,
    dependency_versions: &BTreeMap<String, Version>,
) -> Result<Option<String>, WorkspaceError> {
    let mut manifest = read_manifest(&package.manifest_path)?;
    let mut changed = false;

    if let Some(version) = new_version {
        let version = Value::String(version.to_string());
        if manifest.get("version") != Some(&version) {
            manifest.insert("version".to_string(), version);
            changed = true;
        }
    }

    for field in DEPENDENCY_FIELDS {
        let Some(Value::Object(table)) = manifest.get_mut(*field) else {
            continue;
        };
        for (dep, version) in dependency_versions {
            let Some(Value::String(spec)) = table.get_mut(dep) else {
                continue;
            };
            if let Some(rewritten) = rewrite_dependency_spec(spec, version) {
                if *spec != rewritten {
                    *spec = rewritten;
                    changed = true;
                }
            }
        }
    }

    if !changed {
        return Ok(None);
    }
    let mut text = serde_json::to_string_pretty(&Value::Object(manifest)).map_err(|e| {
        WorkspaceError::ManifestParse {
            path: package.manifest_path.clone(),
            message: e.to_string(),
        }
    })?;
    text.push('\n');
    Ok(Some(text))
}

/// Write `text` as the manifest of `package`.
pub fn write_manifest(package: &Package, text: &str) -> Result<(), WorkspaceError> {
    std::fs::write(&package.manifest_path, text).map_err(|source| WorkspaceError::ManifestWrite {
        path: package.manifest_path.clone(),
        source,
    })
}

/// [`updated_manifest`], written unless `dry_run`. Returns whether the manifest
/// changed.
pub fn update_manifest(
    package: &Package,
    new_version: Option<&Version>,
    dependency_versions: &BTreeMap<String, Version>,
    dry_run: bool,
) -> Result<bool, WorkspaceError> {
    let Some(text) = updated_manifest(package, new_version, dependency_versions)? else {
        return Ok(false);
    };
    if !dry_run {
        write_manifest(package, &text)?;
    }
    Ok(true)
}
