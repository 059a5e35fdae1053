mod asset_store;
mod extension_source;

pub use asset_store::AssetStore;
pub use extension_source::{ExtensionResourceRequest, ExtensionSource};
