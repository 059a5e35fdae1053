//! Network and disk fragments derived from pool profiles.
//!
//! Every function returns JSON-fragment text meant to be spliced into a larger
//! template, not a standalone JSON document.

use std::collections::HashSet;

use crate::domain::AppError;
use crate::domain::cluster::{AgentPoolProfile, MasterProfile, Properties, StorageProfile};

/// Base priority of generated inbound security rules.
pub const BASE_LB_PRIORITY: u32 = 200;

const FRAGMENT_SEPARATOR: &str = ",\n";

/// Virtual network address prefixes: master first, then each distinct pool subnet.
pub fn vnet_address_prefixes(properties: &Properties) -> String {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut buf = String::from(r#""[variables('masterSubnet')]""#);
    if let Some(master) = &properties.master_profile {
        visited.insert(master.subnet.as_str());
    }
    for profile in &properties.agent_pool_profiles {
        if visited.insert(profile.subnet.as_str()) {
            buf.push_str(&format!(",\n            \"[variables('{}Subnet')]\"", profile.name));
        }
    }
    buf
}

/// NSG resource dependencies of the virtual network, one per pool.
pub fn vnet_subnet_dependencies(properties: &Properties) -> String {
    properties
        .agent_pool_profiles
        .iter()
        .map(|profile| {
            format!(
                "        \"[concat('Microsoft.Network/networkSecurityGroups/', variables('{}NSGName'))]\"",
                profile.name
            )
        })
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Subnet fragments: master first, then one per pool.
///
/// `add_nsg` attaches each pool subnet to its network security group; it
/// applies to the whole call, and the master subnet is never attached.
pub fn vnet_subnets(properties: &Properties, add_nsg: bool) -> String {
    let mut buf = String::from(
        r#"{
            "name": "[variables('masterSubnetName')]",
            "properties": {
              "addressPrefix": "[variables('masterSubnet')]"
            }
          }"#,
    );
    for profile in &properties.agent_pool_profiles {
        buf.push_str(FRAGMENT_SEPARATOR);
        buf.push_str(&agent_subnet(&profile.name, add_nsg));
    }
    buf
}

fn agent_subnet(name: &str, add_nsg: bool) -> String {
    if add_nsg {
        format!(
            r#"          {{
            "name": "[variables('{name}SubnetName')]",
            "properties": {{
              "addressPrefix": "[variables('{name}Subnet')]",
              "networkSecurityGroup": {{
                "id": "[resourceId('Microsoft.Network/networkSecurityGroups', variables('{name}NSGName'))]"
              }}
            }}
          }}"#
        )
    } else {
        format!(
            r#"          {{
            "name": "[variables('{name}SubnetName')]",
            "properties": {{
              "addressPrefix": "[variables('{name}Subnet')]"
            }}
          }}"#
        )
    }
}

fn lb_rule(name: &str, port: u32) -> String {
    format!(
        r#"          {{
            "name": "LBRule{port}",
            "properties": {{
              "backendAddressPool": {{
                "id": "[concat(variables('{name}LbID'), '/backendAddressPools/', variables('{name}LbBackendPoolName'))]"
              }},
              "backendPort": {port},
              "enableFloatingIP": false,
              "frontendIPConfiguration": {{
                "id": "[variables('{name}LbIPConfigID')]"
              }},
              "frontendPort": {port},
              "idleTimeoutInMinutes": 5,
              "loadDistribution": "Default",
              "probe": {{
                "id": "[concat(variables('{name}LbID'),'/probes/tcp{port}Probe')]"
              }},
              "protocol": "tcp"
            }}
          }}"#
    )
}

/// Load-balancer rules for a pool, one per port.
pub fn lb_rules(name: &str, ports: &[u32]) -> String {
    ports.iter().map(|port| lb_rule(name, *port)).collect::<Vec<_>>().join(FRAGMENT_SEPARATOR)
}

fn probe(port: u32) -> String {
    format!(
        r#"          {{
            "name": "tcp{port}Probe",
            "properties": {{
              "intervalInSeconds": "5",
              "numberOfProbes": "2",
              "port": {port},
              "protocol": "tcp"
            }}
          }}"#
    )
}

/// TCP health probes, one per port.
pub fn probes(ports: &[u32]) -> String {
    ports.iter().map(|port| probe(*port)).collect::<Vec<_>>().join(FRAGMENT_SEPARATOR)
}

/// Priority of the security rule for the port at `port_index` in a pool's port list.
pub fn security_rule_priority(port_index: usize) -> u32 {
    BASE_LB_PRIORITY + port_index as u32
}

fn security_rule(port: u32, port_index: usize) -> String {
    let priority = security_rule_priority(port_index);
    format!(
        r#"          {{
            "name": "Allow_{port}",
            "properties": {{
              "access": "Allow",
              "description": "Allow traffic from the Internet to port {port}",
              "destinationAddressPrefix": "*",
              "destinationPortRange": "{port}",
              "direction": "Inbound",
              "priority": {priority},
              "protocol": "*",
              "sourceAddressPrefix": "Internet",
              "sourcePortRange": "*"
            }}
          }}"#
    )
}

/// Inbound allow rules; priority follows the port's position in the list.
pub fn security_rules(ports: &[u32]) -> String {
    ports
        .iter()
        .enumerate()
        .map(|(index, port)| security_rule(*port, index))
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

fn unmanaged_data_disk(name: &str, size: u32, lun: usize) -> String {
    // Storage account = mod(numerator, count); page index = div(numerator, count).
    let numerator = format!(
        "add(add(div(copyIndex(),variables('maxVMsPerStorageAccount')),variables('{name}StorageAccountOffset')),variables('dataStorageAccountPrefixSeed'))"
    );
    format!(
        r#"            {{
              "createOption": "Empty",
              "diskSizeGB": "{size}",
              "lun": {lun},
              "name": "[concat(variables('{name}VMNamePrefix'), copyIndex(),'-datadisk{lun}')]",
              "vhd": {{
                "uri": "[concat('http://',variables('storageAccountPrefixes')[mod({numerator},variables('storageAccountPrefixesCount'))],variables('storageAccountPrefixes')[div({numerator},variables('storageAccountPrefixesCount'))],variables('{name}DataAccountName'),'.blob.core.windows.net/vhds/',variables('{name}VMNamePrefix'),copyIndex(), '--datadisk{lun}.vhd')]"
              }}
            }}"#
    )
}

fn managed_data_disk(size: u32, lun: usize) -> String {
    format!(
        r#"            {{
              "diskSizeGB": "{size}",
              "lun": {lun},
              "createOption": "Empty"
            }}"#
    )
}

/// `"dataDisks": [...]` property for a pool, or an empty string without disks.
pub fn data_disks(profile: &AgentPoolProfile) -> String {
    if !profile.has_disks() {
        return String::new();
    }
    let disks = profile
        .disk_sizes_gb
        .iter()
        .enumerate()
        .map(|(lun, size)| match profile.storage_profile {
            StorageProfile::StorageAccount => unmanaged_data_disk(&profile.name, *size, lun),
            StorageProfile::ManagedDisks => managed_data_disk(*size, lun),
        })
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR);
    format!("\"dataDisks\": [\n{}\n          ],", disks)
}

/// Highest third octet available for a `10.244.<n>.0/24` pod subnet.
pub const MAX_POD_CIDR_INDEX: u32 = 255;

/// First pod CIDR index handed to Windows nodes.
///
/// Counts every master and non-Windows agent so Windows pod ranges never
/// overlap the ranges routed to Linux nodes.
pub fn kubernetes_pod_start_index(properties: &Properties) -> Result<u32, AppError> {
    let masters = properties.master_profile.as_ref().map_or(0, |m: &MasterProfile| m.count);
    properties
        .agent_pool_profiles
        .iter()
        .filter(|profile| !profile.is_windows())
        .try_fold(masters, |total, profile| total.checked_add(profile.count))
        .and_then(|total| total.checked_add(1))
        .ok_or_else(|| AppError::invalid_input("node counts overflow the pod CIDR index"))
}

/// Pod CIDR subnets for Windows agents, one `/24` per VM, each prefixed by a separator.
///
/// Fails when a Windows VM would need an index past `10.244.255.0/24`.
pub fn kubernetes_subnets(properties: &Properties) -> Result<String, AppError> {
    let mut buf = String::new();
    let mut cidr_index = kubernetes_pod_start_index(properties)?;
    for profile in properties.agent_pool_profiles.iter().filter(|p| p.is_windows()) {
        for _ in 0..profile.count {
            if cidr_index > MAX_POD_CIDR_INDEX {
                return Err(AppError::invalid_input(format!(
                    "pod CIDR index {} for pool '{}' exceeds 10.244.{}.0/24",
                    cidr_index, profile.name, MAX_POD_CIDR_INDEX
                )));
            }
            buf.push_str(FRAGMENT_SEPARATOR);
            buf.push_str(&format!(
                r#"{{
            "name": "podCIDR{cidr_index}",
            "properties": {{
              "addressPrefix": "10.244.{cidr_index}.0/24",
              "networkSecurityGroup": {{
                "id": "[variables('nsgID')]"
              }},
              "routeTable": {{
                "id": "[variables('routeTableID')]"
              }}
            }}
          }}"#
            ));
            cidr_index += 1;
        }
    }
    Ok(buf)
}
