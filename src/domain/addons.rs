//! Add-on manifest settings derived from the resolved add-on list.

use crate::domain::cluster::Properties;

/// Directory on master nodes that holds add-on manifests.
pub const ADDONS_DESTINATION_PATH: &str = "/etc/kubernetes/addons";

/// How one add-on manifest is produced and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonSetting {
    pub name: String,
    pub is_enabled: bool,
    /// Inline manifest used instead of rendering `source_file`.
    pub raw_script: Option<String>,
    pub source_file: String,
    pub destination_file: String,
}

/// Settings for every declared add-on, sorted by name.
pub fn addon_settings(properties: &Properties) -> Vec<AddonSetting> {
    let mut settings: Vec<AddonSetting> = properties
        .addons()
        .iter()
        .map(|addon| {
            let file = format!("{}.yaml", addon.name);
            AddonSetting {
                name: addon.name.clone(),
                is_enabled: addon.is_enabled(),
                raw_script: (!addon.data.is_empty()).then(|| addon.data.clone()),
                source_file: file.clone(),
                destination_file: file,
            }
        })
        .collect();
    settings.sort_by(|a, b| a.name.cmp(&b.name));
    settings
}
