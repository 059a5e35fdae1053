mod embedded_asset_store;
mod extension_http;
mod filesystem_asset_store;
mod memory_asset_store;

pub use embedded_asset_store::EmbeddedAssetStore;
pub use extension_http::HttpExtensionSource;
pub use filesystem_asset_store::FilesystemAssetStore;
pub use memory_asset_store::MemoryAssetStore;
