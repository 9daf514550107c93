//! Workspace packages: discovery of `package.json` manifests and manifest updates.

pub mod discovery;
pub mod manifest;

pub use discovery::discover_packages;
pub use manifest::{rewrite_dependency_spec, update_manifest, updated_manifest, write_manifest};

use semver::Version;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A versioned package found in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub version: Version,
    pub dir: PathBuf,
    pub manifest_path: PathBuf,
    pub private: bool,
    /// Dependency name to version spec, across all dependency tables
    pub dependencies: BTreeMap<String, String>,
}

impl Package {
    /// This package's changelog path for the given file name.
    pub fn changelog_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// All packages under a workspace root, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub root: PathBuf,
    pub packages: Vec<Package>,
}

impl Workspace {
    pub fn new(root: PathBuf, mut packages: Vec<Package>) -> Self {
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Self { root, packages }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages
            .binary_search_by(|p| p.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.packages[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Packages that list `name` in any dependency table.
    pub fn dependents_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Package> + 'a {
        self.packages
            .iter()
            .filter(move |p| p.dependencies.contains_key(name))
    }

    /// Path relative to the workspace root for display.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
