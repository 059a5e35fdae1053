//! Shared testing utilities for armrender CLI and library tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Cluster specification used by most tests: one master, a Linux scale-set
/// pool and a Windows availability-set pool.
pub const CLUSTER_JSON: &str = r#"{
  "location": "westus2",
  "properties": {
    "orchestratorProfile": { "orchestratorType": "Kubernetes", "orchestratorVersion": "1.10.0" },
    "masterProfile": {
      "count": 1,
      "dnsPrefix": "demo",
      "subnet": "10.240.255.0/24",
      "firstConsecutiveStaticIP": "10.240.255.5",
      "vmSize": "Standard_D2_v2"
    },
    "agentPoolProfiles": [
      { "name": "linuxpool", "count": 2, "vmSize": "Standard_DS2_v2", "subnet": "10.240.0.0/16" },
      {
        "name": "winpool",
        "count": 2,
        "vmSize": "Standard_D2_v2",
        "osType": "Windows",
        "availabilityProfile": "AvailabilitySet",
        "subnet": "10.240.0.0/16"
      }
    ],
    "certificateProfile": {
      "caCertificate": "CA",
      "kubeConfigCertificate": "CERT",
      "kubeConfigPrivateKey": "KEY"
    },
    "servicePrincipalProfile": { "clientId": "sp-id", "secret": "sp-secret" }
  }
}"#;

/// Isolated working directory holding a cluster file and optional config.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write the default cluster specification and return its path.
    pub fn cluster(&self) -> PathBuf {
        self.write("cluster.json", CLUSTER_JSON)
    }

    /// Write `content` to `name` inside the work directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Cluster specification with its `properties` replaced by `patch` fields.
    pub fn cluster_with(&self, patch: serde_json::Value) -> PathBuf {
        let mut doc: serde_json::Value = serde_json::from_str(CLUSTER_JSON).unwrap();
        if let (Some(props), Some(patch)) = (doc["properties"].as_object_mut(), patch.as_object()) {
            for (key, value) in patch {
                props.insert(key.clone(), value.clone());
            }
        }
        self.write("cluster.json", &doc.to_string())
    }

    /// Build a command for invoking the compiled `armrender` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("armrender").expect("Failed to locate armrender binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }
}
