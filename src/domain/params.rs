//! Deployment parameter wrappers and key vault secret references.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::cluster::Properties;

/// Parameter name to wrapper, serialized in key order.
pub type ParamsMap = BTreeMap<String, ParamEntry>;

/// One deployment parameter: either an inline value or a secret reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamEntry {
    Value(Value),
    Reference(KeyVaultRef),
}

impl ParamEntry {
    pub fn value(&self) -> Option<&Value> {
        match self {
            ParamEntry::Value(value) => Some(value),
            ParamEntry::Reference(_) => None,
        }
    }

    pub fn reference(&self) -> Option<&KeyVaultRef> {
        match self {
            ParamEntry::Reference(reference) => Some(reference),
            ParamEntry::Value(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyVaultId {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyVaultRef {
    pub key_vault: KeyVaultId,
    pub secret_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_version: String,
}

fn keyvault_secret_path() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(/subscriptions/\S+/resourceGroups/\S+/providers/Microsoft.KeyVault/vaults/\S+)/secrets/([^/\s]+)(/(\S+))?$",
        )
        .expect("key vault secret pattern must compile")
    })
}

pub fn add_value(m: &mut ParamsMap, key: &str, value: impl Into<Value>) {
    m.insert(key.to_string(), ParamEntry::Value(value.into()));
}

pub fn add_keyvault_reference(
    m: &mut ParamsMap,
    key: &str,
    vault_id: &str,
    secret_name: &str,
    secret_version: &str,
) {
    m.insert(
        key.to_string(),
        ParamEntry::Reference(KeyVaultRef {
            key_vault: KeyVaultId { id: vault_id.to_string() },
            secret_name: secret_name.to_string(),
            secret_version: secret_version.to_string(),
        }),
    );
}

/// Add a parameter that may hold a secret.
///
/// Strings shaped like a key vault secret path become references; other
/// strings are stored inline, base64-encoded first when `encode` is set.
/// Non-string values are stored as-is.
pub fn add_secret(m: &mut ParamsMap, key: &str, value: impl Into<Value>, encode: bool) {
    let value = value.into();
    let Value::String(text) = value else {
        add_value(m, key, value);
        return;
    };

    match keyvault_secret_path().captures(&text) {
        Some(parts) => {
            let vault_id = parts.get(1).map_or("", |p| p.as_str());
            let secret_name = parts.get(2).map_or("", |p| p.as_str());
            let secret_version = parts.get(4).map_or("", |p| p.as_str());
            add_keyvault_reference(m, key, vault_id, secret_name, secret_version);
        }
        None if encode => add_value(m, key, STANDARD.encode(text.as_bytes())),
        None => add_value(m, key, text),
    }
}

/// Collect certificate, service principal and extension parameters for a cluster.
pub fn build_parameters(properties: &Properties) -> ParamsMap {
    let mut params = ParamsMap::new();

    if let Some(certs) = &properties.certificate_profile {
        let entries = [
            ("caCertificate", &certs.ca_certificate),
            ("caPrivateKey", &certs.ca_private_key),
            ("apiServerCertificate", &certs.api_server_certificate),
            ("apiServerPrivateKey", &certs.api_server_private_key),
            ("clientCertificate", &certs.client_certificate),
            ("clientPrivateKey", &certs.client_private_key),
            ("kubeConfigCertificate", &certs.kube_config_certificate),
            ("kubeConfigPrivateKey", &certs.kube_config_private_key),
        ];
        for (key, value) in entries {
            if !value.is_empty() {
                add_secret(&mut params, key, value.as_str(), true);
            }
        }
    }

    if let Some(sp) = &properties.service_principal_profile {
        add_value(&mut params, "servicePrincipalClientId", sp.client_id.as_str());
        add_secret(&mut params, "servicePrincipalClientSecret", sp.secret.as_str(), false);
    }

    for extension in &properties.extension_profiles {
        add_value(&mut params, &extension.parameters_name(), extension.extension_parameters.as_str());
    }

    params
}
