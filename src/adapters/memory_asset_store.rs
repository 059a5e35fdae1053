use std::collections::HashMap;

use crate::domain::AppError;
use crate::ports::AssetStore;

/// In-memory asset store for callers that already hold template text.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), content.into());
    }
}

impl AssetStore for MemoryAssetStore {
    fn get_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.assets.get(name).cloned())
    }
}
