use crate::domain::cluster::{
    AgentPoolProfile, AvailabilityProfile, CertificateProfile, ContainerService, Extension,
    ExtensionProfile, KubernetesConfig, MasterProfile, OrchestratorProfile, OsType, Properties,
};

pub const EXTENSION_ROOT: &str = "https://ext.example/";

/// Linked template exercising every substitution token.
pub const HELLO_TEMPLATE_LINK: &str = r#"{
  "name": "[concat(EXTENSION_TARGET_VM_NAME_PREFIX, copyIndex(EXTENSION_LOOP_OFFSET), '/hello')]",
  "type": "Microsoft.Resources/deployments",
  "copy": { "count": "EXTENSION_LOOP_COUNT", "name": "helloExtensionLoop" },
  "properties": {
    "templateLink": { "uri": "EXTENSION_URL_REPLACEextensions/hello/v1/template.json" },
    "parameters": {
      "extensionParameters": { "value": "EXTENSION_PARAMETERS_REPLACE" },
      "targetVMType": { "value": "EXTENSION_TARGET_VM_TYPE" }
    }
  }
}"#;

pub fn opt_in(name: &str, mode: &str) -> Extension {
    Extension { name: name.to_string(), single_or_all: mode.to_string() }
}

pub fn extension(name: &str) -> ExtensionProfile {
    ExtensionProfile {
        name: name.to_string(),
        version: "v1".to_string(),
        extension_parameters: "param".to_string(),
        root_url: EXTENSION_ROOT.to_string(),
        script: format!("{}.sh", name),
        url_query: String::new(),
    }
}

pub fn pool(name: &str, count: u32) -> AgentPoolProfile {
    AgentPoolProfile {
        name: name.to_string(),
        count,
        vm_size: "Standard_DS2_v2".to_string(),
        subnet: "10.240.0.0/16".to_string(),
        ..Default::default()
    }
}

/// One master, a Linux scale-set pool and a Windows availability-set pool.
pub fn cluster() -> ContainerService {
    let mut windows = pool("winpool", 2);
    windows.os_type = OsType::Windows;
    windows.availability_profile = AvailabilityProfile::AvailabilitySet;

    ContainerService {
        location: "westus2".to_string(),
        properties: Some(Properties {
            orchestrator_profile: Some(OrchestratorProfile {
                orchestrator_type: "Kubernetes".to_string(),
                orchestrator_version: "1.10.0".to_string(),
                kubernetes_config: Some(KubernetesConfig::default()),
            }),
            master_profile: Some(MasterProfile {
                count: 1,
                dns_prefix: "demo".to_string(),
                subnet: "10.240.255.0/24".to_string(),
                first_consecutive_static_ip: "10.240.255.5".to_string(),
                vm_size: "Standard_D2_v2".to_string(),
                ..Default::default()
            }),
            agent_pool_profiles: vec![pool("linuxpool", 2), windows],
            certificate_profile: Some(CertificateProfile {
                ca_certificate: "CA".to_string(),
                kube_config_certificate: "CERT".to_string(),
                kube_config_private_key: "KEY".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
    }
}
