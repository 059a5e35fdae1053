use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::domain::AppError;
use crate::ports::AssetStore;

/// Asset store reading templates from a directory tree.
#[derive(Debug, Clone)]
pub struct FilesystemAssetStore {
    root: PathBuf,
}

impl FilesystemAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for FilesystemAssetStore {
    fn get_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AppError> {
        let relative = Path::new(name);
        // Asset names never escape the root.
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Ok(None);
        }
        match fs::read(self.root.join(relative)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Io(err)),
        }
    }
}
