use serde_json::Value;

use crate::app::AppContext;
use crate::domain::{AppError, ContainerService};

/// Options for rendering a single asset.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Asset name in the configured store.
    pub asset: String,
    /// Render against this agent pool instead of the master profile.
    pub pool: Option<String>,
    /// Escape the result for embedding in a JSON string.
    pub single_line: bool,
}

pub fn execute(
    ctx: &AppContext,
    cs: &ContainerService,
    options: &RenderOptions,
) -> Result<String, AppError> {
    let generator = ctx.generator(cs)?;
    let properties = generator.properties();

    let profile: Value = match &options.pool {
        Some(name) => {
            let pool = properties.agent_pool(name).ok_or_else(|| {
                AppError::invalid_input(format!("agent pool '{}' not found", name))
            })?;
            serde_json::to_value(pool)?
        }
        None => {
            let master = properties
                .master_profile
                .as_ref()
                .ok_or_else(|| AppError::invalid_input("masterProfile is required"))?;
            serde_json::to_value(master)?
        }
    };

    if options.single_line {
        generator.single_line_for_template(&options.asset, &profile)
    } else {
        generator.single_line(&options.asset, &profile)
    }
}
