//! Pre-provision extension commands embedded in node custom data.

use crate::domain::cluster::{AgentPoolProfile, ExtensionProfile, Properties};

use super::ExtensionCatalog;

/// Commands for the master pre-provision extension, or empty when none is set.
pub fn master_extension_script_commands(properties: &Properties, catalog: &ExtensionCatalog) -> String {
    let Some(extension) =
        properties.master_profile.as_ref().and_then(|m| m.preprovision_extension.as_ref())
    else {
        return String::new();
    };
    linux_script_commands(catalog.expect_referenced(&extension.name))
}

/// Commands for a pool's pre-provision extension, or empty when none is set.
pub fn agent_extension_script_commands(catalog: &ExtensionCatalog, pool: &AgentPoolProfile) -> String {
    let Some(extension) = pool.preprovision_extension.as_ref() else {
        return String::new();
    };
    let profile = catalog.expect_referenced(&extension.name);
    if pool.is_windows() { windows_script_commands(profile) } else { linux_script_commands(profile) }
}

fn linux_script_commands(profile: &ExtensionProfile) -> String {
    let parameters_reference = format!("parameters('{}')", profile.parameters_name());
    let script_url = profile.resource_url(&profile.script);
    let script_path = format!("/opt/azure/containers/extensions/{}/{}", profile.name, profile.script);
    format!(
        "- sudo /usr/bin/curl --retry 5 --retry-delay 10 --retry-max-time 30 -o {path} --create-dirs \"{url}\" \n- sudo /bin/chmod 744 {path} \n- sudo {path} ',{params},' > /var/log/{name}-output.log",
        path = script_path,
        url = script_url,
        params = parameters_reference,
        name = profile.name,
    )
}

fn windows_script_commands(profile: &ExtensionProfile) -> String {
    let script_url = profile.resource_url(&profile.script);
    let script_dir = format!("$env:SystemDrive:/AzureData/extensions/{}", profile.name);
    let script_path = format!("{}/{}", script_dir, profile.script);
    format!(
        "New-Item -ItemType Directory -Force -Path \"{dir}\" ; Invoke-WebRequest -Uri \"{url}\" -OutFile \"{path}\" ; powershell \"{path} $preprovisionExtensionParams\"\n",
        dir = script_dir,
        url = script_url,
        path = script_path,
    )
}
