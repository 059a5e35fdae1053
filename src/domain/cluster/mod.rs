//! Typed cluster specification consumed by the renderer.
//!
//! The model is deserialized from the cluster-spec JSON document and is
//! treated as read-only; defaults and validation happen upstream.

mod addon;
pub mod cloud;
mod pool;

use serde::{Deserialize, Serialize};

pub use addon::{AddonContainer, KubernetesAddon};
pub use pool::{
    AgentPoolProfile, AvailabilityProfile, Extension, MasterProfile, OsType, StorageProfile,
};

/// Orchestrator type string for Kubernetes clusters.
pub const KUBERNETES: &str = "Kubernetes";

/// Root of the cluster specification document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerService {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl ContainerService {
    /// Parse a cluster specification from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default)]
    pub orchestrator_profile: Option<OrchestratorProfile>,
    #[serde(default)]
    pub master_profile: Option<MasterProfile>,
    #[serde(default)]
    pub agent_pool_profiles: Vec<AgentPoolProfile>,
    #[serde(default)]
    pub extension_profiles: Vec<ExtensionProfile>,
    #[serde(default)]
    pub certificate_profile: Option<CertificateProfile>,
    #[serde(default, rename = "aadProfile")]
    pub aad_profile: Option<AadProfile>,
    #[serde(default)]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
}

impl Properties {
    /// Orchestrator type, or an empty string when no orchestrator profile is set.
    pub fn orchestrator_type(&self) -> &str {
        self.orchestrator_profile.as_ref().map(|o| o.orchestrator_type.as_str()).unwrap_or("")
    }

    pub fn is_kubernetes(&self) -> bool {
        self.orchestrator_type() == KUBERNETES
    }

    pub fn is_private_cluster(&self) -> bool {
        self.orchestrator_profile
            .as_ref()
            .and_then(|o| o.kubernetes_config.as_ref())
            .and_then(|k| k.private_cluster.as_ref())
            .and_then(|p| p.enabled)
            .unwrap_or(false)
    }

    pub fn agent_pool(&self, name: &str) -> Option<&AgentPoolProfile> {
        self.agent_pool_profiles.iter().find(|p| p.name == name)
    }

    pub fn addons(&self) -> &[KubernetesAddon] {
        self.orchestrator_profile
            .as_ref()
            .and_then(|o| o.kubernetes_config.as_ref())
            .map(|k| k.addons.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorProfile {
    pub orchestrator_type: String,
    #[serde(default)]
    pub orchestrator_version: String,
    #[serde(default)]
    pub kubernetes_config: Option<KubernetesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesConfig {
    #[serde(default)]
    pub private_cluster: Option<PrivateCluster>,
    #[serde(default)]
    pub addons: Vec<KubernetesAddon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateCluster {
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Certificate material, stored as PEM text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProfile {
    #[serde(default)]
    pub ca_certificate: String,
    #[serde(default)]
    pub ca_private_key: String,
    #[serde(default)]
    pub api_server_certificate: String,
    #[serde(default)]
    pub api_server_private_key: String,
    #[serde(default)]
    pub client_certificate: String,
    #[serde(default)]
    pub client_private_key: String,
    #[serde(default)]
    pub kube_config_certificate: String,
    #[serde(default)]
    pub kube_config_private_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AadProfile {
    #[serde(default, rename = "clientAppID")]
    pub client_app_id: String,
    #[serde(default, rename = "serverAppID")]
    pub server_app_id: String,
    #[serde(default, rename = "tenantID")]
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalProfile {
    #[serde(default, rename = "clientId")]
    pub client_id: String,
    /// Either an inline secret or a key vault secret path.
    #[serde(default)]
    pub secret: String,
}

/// A remotely hosted extension available to the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionProfile {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub extension_parameters: String,
    #[serde(rename = "rootURL")]
    pub root_url: String,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub url_query: String,
}

impl ExtensionProfile {
    /// URL of a file published under this extension's version directory.
    pub fn resource_url(&self, file_name: &str) -> String {
        extension_url(&self.root_url, &self.name, &self.version, file_name, &self.url_query)
    }

    /// Template parameter name that carries this extension's parameters.
    pub fn parameters_name(&self) -> String {
        format!("{}Parameters", self.name)
    }
}

/// Build `<root>extensions/<name>/<version>/<file>[?<query>]`.
pub fn extension_url(
    root_url: &str,
    extension_name: &str,
    version: &str,
    file_name: &str,
    query: &str,
) -> String {
    let mut url = format!("{}extensions/{}/{}/{}", root_url, extension_name, version, file_name);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}
