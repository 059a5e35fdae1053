use std::collections::HashMap;

use crate::domain::cluster::ExtensionProfile;

/// Extension profiles indexed by lowercase name.
///
/// Built once per cluster and shared by every template function call.
#[derive(Debug, Clone, Default)]
pub struct ExtensionCatalog {
    by_name: HashMap<String, ExtensionProfile>,
}

impl ExtensionCatalog {
    pub fn new(profiles: &[ExtensionProfile]) -> Self {
        let mut by_name = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            // First declaration wins for duplicate names.
            by_name.entry(profile.name.to_lowercase()).or_insert_with(|| profile.clone());
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionProfile> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Look up an extension a pool references.
    ///
    /// # Panics
    ///
    /// Panics when the name is not in the catalog: a pool referencing an
    /// undeclared extension is an invalid cluster specification.
    pub fn expect_referenced(&self, name: &str) -> &ExtensionProfile {
        match self.get(name) {
            Some(profile) => profile,
            None => panic!("{} extension referenced was not found in the extension profile", name),
        }
    }
}
