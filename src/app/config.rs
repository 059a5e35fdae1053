//! Engine configuration loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, EngineConfig};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "armrender.toml";

/// Load the engine configuration.
///
/// An explicit `path` must exist. Without one, `armrender.toml` in the
/// working directory is used when present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, AppError> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(EngineConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<EngineConfig, AppError> {
    let config: EngineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
