//! Image assets

use crate::{DeckError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where slide images come from
pub trait ImageSource {
    /// Raw file bytes of the image called `name`
    fn load(&self, name: &str) -> Result<Vec<u8>>;
}

/// Images stored as `<root>/<name>`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for DirectorySource {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|e| DeckError::Asset {
            name: name.to_string(),
            reason: format!("failed to read {}: {e}", path.display()),
        })
    }
}

/// In-memory images keyed by name
impl ImageSource for HashMap<String, Vec<u8>> {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        self.get(name).cloned().ok_or_else(|| DeckError::Asset {
            name: name.to_string(),
            reason: "not found".to_string(),
        })
    }
}

/// What to do when an image is missing, undecodable or cannot be fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAssetPolicy {
    /// Fail the whole build
    #[default]
    Abort,
    /// Leave the image out and log a warning
    Skip,
}
