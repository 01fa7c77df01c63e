use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{errors::CatalogError, types::Revision};

/// Files that only keep a directory in version control or are left by tools.
const PLACEHOLDERS: [&str; 4] = [".gitkeep", ".keep", ".gitignore", ".DS_Store"];

/// Revisions available on disk, read fresh on every call.
#[derive(Clone, Debug)]
pub struct RevisionCatalog {
    dir: PathBuf,
}

impl RevisionCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists every revision in the migrations directory, ascending by id.
    ///
    /// The scan is not recursive and only regular files count. Placeholders such
    /// as `.gitkeep` are ignored; any other file must have a UTF-8 name of the
    /// form `<id>_<name>.<ext>` or the whole read fails. With `limit`, only the
    /// last `limit` revisions are returned.
    pub fn list_revisions(&self, limit: Option<usize>) -> Result<Vec<Revision>, CatalogError> {
        let unreadable = |source| CatalogError::Unreadable {
            path: self.dir.clone(),
            source,
        };

        let mut revisions: BTreeMap<String, Revision> = BTreeMap::new();

        for entry in fs::read_dir(&self.dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            if !entry.path().is_file() {
                continue;
            }

            let filename = entry.file_name().into_string().map_err(|raw| {
                CatalogError::MalformedFilename {
                    filename: raw.to_string_lossy().into_owned(),
                }
            })?;
            if PLACEHOLDERS.contains(&filename.as_str()) {
                continue;
            }
            if filename.starts_with('.') {
                return Err(CatalogError::MalformedFilename { filename });
            }

            let revision = Revision::from_filename(&filename)?;
            if let Some(existing) = revisions.get(&revision.id) {
                let (first, second) = if existing.filename <= revision.filename {
                    (existing.filename.clone(), revision.filename)
                } else {
                    (revision.filename, existing.filename.clone())
                };
                return Err(CatalogError::DuplicateRevision {
                    id: revision.id,
                    first,
                    second,
                });
            }
            revisions.insert(revision.id.clone(), revision);
        }

        let mut list: Vec<Revision> = revisions.into_values().collect();
        if let Some(limit) = limit {
            let skip = list.len().saturating_sub(limit);
            list.drain(..skip);
        }

        debug!(
            dir = %self.dir.display(),
            count = list.len(),
            "Scanned migrations directory"
        );

        Ok(list)
    }
}
