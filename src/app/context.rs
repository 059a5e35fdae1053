use std::sync::Arc;

use crate::adapters::{EmbeddedAssetStore, FilesystemAssetStore, HttpExtensionSource};
use crate::domain::{AppError, ContainerService, EngineConfig};
use crate::ports::{AssetStore, ExtensionSource};

use super::services::TemplateGenerator;

/// Application context holding dependencies for command execution.
#[derive(Clone)]
pub struct AppContext {
    config: EngineConfig,
    assets: Arc<dyn AssetStore>,
    extensions: Arc<dyn ExtensionSource>,
}

impl AppContext {
    /// Create a new application context.
    pub fn new(
        config: EngineConfig,
        assets: Arc<dyn AssetStore>,
        extensions: Arc<dyn ExtensionSource>,
    ) -> Self {
        Self { config, assets, extensions }
    }

    /// Wire the production adapters selected by `config`.
    pub fn from_config(config: EngineConfig) -> Result<Self, AppError> {
        let assets: Arc<dyn AssetStore> = match &config.assets.dir {
            Some(dir) => Arc::new(FilesystemAssetStore::new(dir.clone())),
            None => Arc::new(EmbeddedAssetStore::new()),
        };
        let extensions = Arc::new(HttpExtensionSource::new(&config.extensions)?);
        Ok(Self::new(config, assets, extensions))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Template generator bound to `cs`, falling back to the configured location.
    pub fn generator(&self, cs: &ContainerService) -> Result<TemplateGenerator, AppError> {
        let mut cs = cs.clone();
        if cs.location.is_empty() {
            cs.location = self.config.render.location.clone();
        }
        TemplateGenerator::new(&cs, self.assets.clone(), self.extensions.clone())
    }
}
