use crate::app::AppContext;
use crate::domain::{AppError, ContainerService};

/// Deployment parameters as pretty-printed JSON.
pub fn execute(ctx: &AppContext, cs: &ContainerService) -> Result<String, AppError> {
    let params = ctx.generator(cs)?.parameters();
    Ok(serde_json::to_string_pretty(&params)?)
}
