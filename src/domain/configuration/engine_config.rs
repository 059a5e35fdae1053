//! Engine configuration domain models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Configuration loaded from `armrender.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub render: RenderConfig,
    /// Remote extension fetch configuration.
    #[serde(default)]
    pub extensions: ExtensionFetchConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.render.validate()?;
        self.extensions.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Location used when the cluster specification does not set one.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { location: default_location() }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.location.trim().is_empty() {
            return Err(AppError::InvalidConfig("location must not be empty".to_string()));
        }
        Ok(())
    }
}

/// HTTP settings for extension resource requests.
///
/// Requests carry no timeout unless `timeout_secs` is set and are never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionFetchConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ExtensionFetchConfig {
    fn default() -> Self {
        Self { timeout_secs: None, user_agent: default_user_agent() }
    }
}

impl ExtensionFetchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == Some(0) {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::InvalidConfig("user_agent must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetConfig {
    /// Filesystem asset root; embedded assets are used when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_location() -> String {
    "westus2".to_string()
}

fn default_user_agent() -> String {
    format!("armrender/{}", env!("CARGO_PKG_VERSION"))
}
