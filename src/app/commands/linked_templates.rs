use crate::app::AppContext;
use crate::domain::{AppError, ContainerService};

/// Comma-prefixed linked-template fragments for every opted-in extension.
pub fn execute(ctx: &AppContext, cs: &ContainerService) -> Result<String, AppError> {
    ctx.generator(cs)?.linked_templates_for_extensions()
}
