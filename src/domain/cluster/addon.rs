use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Container resource settings of an add-on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonContainer {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, rename = "cpuRequests")]
    pub cpu_requests: String,
    #[serde(default, rename = "memoryRequests")]
    pub memory_requests: String,
    #[serde(default, rename = "cpuLimits")]
    pub cpu_limits: String,
    #[serde(default, rename = "memoryLimits")]
    pub memory_limits: String,
}

/// A Kubernetes add-on whose enablement has already been resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesAddon {
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub containers: Vec<AddonContainer>,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Inline manifest that replaces the bundled template when present.
    #[serde(default)]
    pub data: String,
}

impl KubernetesAddon {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn container(&self, name: &str) -> Option<&AddonContainer> {
        self.containers.iter().find(|c| c.name == name)
    }
}
