use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::AppError;
use crate::ports::AssetStore;

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

/// Asset store backed by templates compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedAssetStore;

impl EmbeddedAssetStore {
    pub fn new() -> Self {
        Self
    }

    /// Names of every embedded asset, sorted.
    pub fn asset_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_names(&ASSETS_DIR, &mut names);
        names.sort();
        names
    }
}

impl AssetStore for EmbeddedAssetStore {
    fn get_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(ASSETS_DIR.get_file(name).map(|file| file.contents().to_vec()))
    }
}

fn collect_names(dir: &'static Dir, names: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => names.push(file.path().to_string_lossy().replace('\\', "/")),
            DirEntry::Dir(subdir) => collect_names(subdir, names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kubeconfig_template_is_embedded() {
        let store = EmbeddedAssetStore::new();
        let text = store.get("kubeconfig.json").unwrap().unwrap();
        assert!(text.contains("{{ auth_info }}"));
    }

    #[test]
    fn nested_assets_resolve_by_relative_path() {
        let store = EmbeddedAssetStore::new();
        assert!(store.asset_names().contains(&"addons/kube-dns.yaml".to_string()));
        assert!(store.get("addons/kube-dns.yaml").unwrap().is_some());
        assert!(store.get("addons/missing.yaml").unwrap().is_none());
    }

    #[test]
    fn every_embedded_asset_is_text() {
        let store = EmbeddedAssetStore::new();
        for name in store.asset_names() {
            assert!(store.get(&name).is_ok(), "{} is not UTF-8", name);
        }
    }
}
