//! Changeset directory access: listing, loading, writing and removing files.

use super::{parse_changeset, changeset_slug, Changeset, NewChangeset};
use crate::error::ChangesetError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files in the changeset directory that are never changesets.
const RESERVED_FILES: &[&str] = &["README.md"];

/// A changeset directory such as `<workspace>/.changeset`.
#[derive(Debug, Clone)]
pub struct ChangesetStore {
    dir: PathBuf,
}

impl ChangesetStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Changeset file paths sorted by file name. A missing directory has none.
    pub fn changeset_paths(&self) -> Result<Vec<PathBuf>, ChangesetError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if is_changeset_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Load every changeset, failing on the first invalid file.
    pub fn load_all(&self) -> Result<Vec<Changeset>, ChangesetError> {
        self.changeset_paths()?
            .iter()
            .map(|path| load_file(path))
            .collect()
    }

    /// Load every changeset, collecting parse failures instead of stopping.
    pub fn load_lenient(
        &self,
    ) -> Result<(Vec<Changeset>, Vec<(PathBuf, ChangesetError)>), ChangesetError> {
        let mut changesets = Vec::new();
        let mut failures = Vec::new();
        for path in self.changeset_paths()? {
            match load_file(&path) {
                Ok(changeset) => changesets.push(changeset),
                Err(ChangesetError::IoError(e)) => return Err(ChangesetError::IoError(e)),
                Err(e) => failures.push((path, e)),
            }
        }
        Ok((changesets, failures))
    }

    /// Write a new changeset and return its path. Creates the directory if needed.
    pub fn write(&self, changeset: &NewChangeset) -> Result<PathBuf, ChangesetError> {
        fs::create_dir_all(&self.dir)?;
        let contents = changeset.render();
        let path = self
            .dir
            .join(format!("{}.md", changeset_slug(&changeset.title, &contents)));
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "Changeset written");
        Ok(path)
    }

    /// Delete a consumed changeset file.
    pub fn remove(&self, changeset: &Changeset) -> Result<(), ChangesetError> {
        fs::remove_file(&changeset.path)?;
        debug!(changeset = %changeset.id, "Changeset removed");
        Ok(())
    }
}

fn is_changeset_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.is_file()
        && name.ends_with(".md")
        && !name.starts_with('.')
        && !RESERVED_FILES.contains(&name)
}

fn load_file(path: &Path) -> Result<Changeset, ChangesetError> {
    let text = String::from_utf8(fs::read(path)?).map_err(|_| ChangesetError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;
    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_changeset(&id, path, &text)
}
