//! Cluster authentication document generation.

use std::net::Ipv4Addr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use crate::domain::AppError;
use crate::domain::cluster::Properties;
use crate::domain::cluster::cloud::{CloudEnvironment, master_fqdn};

/// Asset name of the base kubeconfig template.
pub const KUBECONFIG_ASSET: &str = "kubeconfig.json";

/// Offset from the first master IP to the internal load balancer IP.
pub const INTERNAL_LB_STATIC_IP_OFFSET: u8 = 10;

const CA_CERTIFICATE_TOKEN: &str = r#"{{ wrap_as_verbatim("parameters('caCertificate')") }}"#;
const SERVER_TOKEN: &str = r#"{{ wrap_as_verbatim("reference(concat('Microsoft.Network/publicIPAddresses/', variables('masterPublicIPAddressName'))).dnsSettings.fqdn") }}"#;
const RESOURCE_GROUP_TOKEN: &str = r#"{{ wrap_as_variable("resourceGroup") }}"#;
const AUTH_INFO_TOKEN: &str = "{{ auth_info }}";

/// Fill the kubeconfig template for a cluster.
pub fn render_kube_config(
    template: &str,
    properties: Option<&Properties>,
    location: &str,
) -> Result<String, AppError> {
    let properties = properties
        .ok_or_else(|| AppError::invalid_input("properties are required for kubeconfig"))?;
    let certificates = properties.certificate_profile.as_ref().ok_or_else(|| {
        AppError::invalid_input("certificateProfile is required for kubeconfig")
    })?;
    let master = properties
        .master_profile
        .as_ref()
        .ok_or_else(|| AppError::invalid_input("masterProfile is required for kubeconfig"))?;

    let server = if properties.is_private_cluster() {
        if master.count > 1 {
            internal_lb_ip(&master.first_consecutive_static_ip)?.to_string()
        } else {
            master.first_consecutive_static_ip.clone()
        }
    } else {
        master_fqdn(&master.dns_prefix, location)
    };

    let auth_info = match &properties.aad_profile {
        None => json!({
            "client-certificate-data": STANDARD.encode(&certificates.kube_config_certificate),
            "client-key-data": STANDARD.encode(&certificates.kube_config_private_key),
        }),
        Some(aad) => {
            let tenant_id = if aad.tenant_id.is_empty() { "common" } else { aad.tenant_id.as_str() };
            json!({
                "auth-provider": {
                    "name": "azure",
                    "config": {
                        "environment": CloudEnvironment::from_location(location).as_str(),
                        "tenant-id": tenant_id,
                        "apiserver-id": aad.server_app_id,
                        "client-id": aad.client_app_id,
                    }
                }
            })
        }
    };

    Ok(template
        .replace(CA_CERTIFICATE_TOKEN, &STANDARD.encode(&certificates.ca_certificate))
        .replace(SERVER_TOKEN, &server)
        .replace(RESOURCE_GROUP_TOKEN, &master.dns_prefix)
        .replace(AUTH_INFO_TOKEN, &auth_info.to_string()))
}

fn internal_lb_ip(first_master_ip: &str) -> Result<Ipv4Addr, AppError> {
    let ip: Ipv4Addr = first_master_ip.parse().map_err(|_| {
        AppError::invalid_input(format!(
            "masterProfile.firstConsecutiveStaticIP '{}' is an invalid IP address",
            first_master_ip
        ))
    })?;
    let [a, b, c, d] = ip.octets();
    let last = d.checked_add(INTERNAL_LB_STATIC_IP_OFFSET).ok_or_else(|| {
        AppError::invalid_input(format!(
            "masterProfile.firstConsecutiveStaticIP '{}' leaves no room for the internal load balancer",
            first_master_ip
        ))
    })?;
    Ok(Ipv4Addr::new(a, b, c, last))
}
