pub mod custom_script;
pub mod kubeconfig;
pub mod linked_templates;
pub mod params;
pub mod render;

use std::fs;
use std::path::Path;

use crate::domain::{AppError, ContainerService};

/// Read and deserialize a cluster specification file.
pub fn load_cluster(path: &Path) -> Result<ContainerService, AppError> {
    let content = fs::read_to_string(path)?;
    Ok(ContainerService::from_json(&content)?)
}
