use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// One migration unit discovered in the migrations directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Revision {
    pub id: String,
    pub name: String,
    pub filename: String,
}

impl Revision {
    /// Parses `<id>_<name>.<ext>`. The stem must split on `_` into exactly two
    /// non-empty parts.
    pub fn from_filename(filename: &str) -> Result<Self, CatalogError> {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);

        let mut parts = stem.split('_');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(name), None) if !id.is_empty() && !name.is_empty() => Ok(Self {
                id: id.to_string(),
                name: name.to_string(),
                filename: filename.to_string(),
            }),
            _ => Err(CatalogError::MalformedFilename {
                filename: filename.to_string(),
            }),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
    }

    /// A run target may name a revision by id or by script name.
    pub fn matches(&self, target: &str) -> bool {
        self.id == target || self.name == target
    }
}
