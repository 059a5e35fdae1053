use serde::{Deserialize, Serialize};

/// Operating system of an agent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OsType {
    #[default]
    Linux,
    Windows,
}

/// Disk storage mode of an agent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageProfile {
    /// Unmanaged disks stored in storage-account page blobs.
    StorageAccount,
    #[default]
    ManagedDisks,
}

/// Instance grouping of an agent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvailabilityProfile {
    AvailabilitySet,
    #[default]
    VirtualMachineScaleSets,
}

/// An opt-in reference from a pool to an extension profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub name: String,
    /// `single` or `all`; anything other than `single` applies to every instance.
    #[serde(default)]
    pub single_or_all: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterProfile {
    pub count: u32,
    pub dns_prefix: String,
    #[serde(default)]
    pub subnet: String,
    #[serde(default, rename = "firstConsecutiveStaticIP")]
    pub first_consecutive_static_ip: String,
    #[serde(default)]
    pub vm_size: String,
    #[serde(default)]
    pub distro: String,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub preprovision_extension: Option<Extension>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPoolProfile {
    pub name: String,
    pub count: u32,
    #[serde(default)]
    pub vm_size: String,
    #[serde(default)]
    pub os_type: OsType,
    #[serde(default)]
    pub subnet: String,
    #[serde(default)]
    pub storage_profile: StorageProfile,
    #[serde(default, rename = "diskSizesGB")]
    pub disk_sizes_gb: Vec<u32>,
    #[serde(default)]
    pub availability_profile: AvailabilityProfile,
    #[serde(default)]
    pub distro: String,
    #[serde(default)]
    pub ports: Vec<u32>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub preprovision_extension: Option<Extension>,
}

impl AgentPoolProfile {
    pub fn is_windows(&self) -> bool {
        self.os_type == OsType::Windows
    }

    pub fn is_availability_sets(&self) -> bool {
        self.availability_profile == AvailabilityProfile::AvailabilitySet
    }

    pub fn has_disks(&self) -> bool {
        !self.disk_sizes_gb.is_empty()
    }
}
