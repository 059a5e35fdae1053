//! Add-on manifests rendered with a function table scoped to one add-on.

use std::sync::Arc;

use minijinja::{Environment, Error, ErrorKind, Value};

use crate::domain::AppError;
use crate::domain::addons::{ADDONS_DESTINATION_PATH, addon_settings};
use crate::domain::cluster::{AddonContainer, KubernetesAddon, Properties};
use crate::domain::custom_script::{base64_custom_script_from_str, write_files_entry};
use crate::ports::AssetStore;

use super::template_generator::render_asset;

fn container<'a>(addon: &'a KubernetesAddon, name: &str) -> Result<&'a AddonContainer, Error> {
    addon.container(name).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("container '{}' not found in addon '{}'", name, addon.name),
        )
    })
}

fn add_container_accessor(
    env: &mut Environment<'_>,
    function: &'static str,
    addon: &Arc<KubernetesAddon>,
    field: fn(&AddonContainer) -> &str,
) {
    let addon = addon.clone();
    env.add_function(function, move |name: String| -> Result<String, Error> {
        Ok(field(container(&addon, &name)?).to_string())
    });
}

/// Install the add-on-scoped function table.
pub fn register(env: &mut Environment<'_>, addon: Arc<KubernetesAddon>) {
    add_container_accessor(env, "container_image", &addon, |c| &c.image);
    add_container_accessor(env, "container_cpu_reqs", &addon, |c| &c.cpu_requests);
    add_container_accessor(env, "container_cpu_limits", &addon, |c| &c.cpu_limits);
    add_container_accessor(env, "container_mem_reqs", &addon, |c| &c.memory_requests);
    add_container_accessor(env, "container_mem_limits", &addon, |c| &c.memory_limits);
    env.add_function("container_config", move |key: String| -> String {
        addon.config.get(&key).cloned().unwrap_or_default()
    });
}

/// Cloud-init `write_files` entries for every enabled add-on, in name order.
pub fn container_addons_string(
    properties: &Properties,
    assets: &dyn AssetStore,
    source_path: &str,
) -> Result<String, AppError> {
    let mut result = String::new();
    for setting in addon_settings(properties).into_iter().filter(|s| s.is_enabled) {
        let manifest = match setting.raw_script {
            Some(raw) => raw,
            None => {
                let addon = properties
                    .addons()
                    .iter()
                    .find(|a| a.name == setting.name)
                    .cloned()
                    .map(Arc::new)
                    .ok_or_else(|| AppError::invalid_input(format!("addon '{}' not found", setting.name)))?;
                let asset = format!("{}/{}", source_path, setting.source_file);
                let context = Value::from_serialize(addon.as_ref());
                render_asset(assets, &asset, context, |env| register(env, addon))?
            }
        };
        tracing::debug!(addon = %setting.name, "packaging addon manifest");
        let packaged = base64_custom_script_from_str(&manifest)?;
        result.push_str(&write_files_entry(
            &packaged,
            ADDONS_DESTINATION_PATH,
            &setting.destination_file,
        ));
    }
    Ok(result)
}
