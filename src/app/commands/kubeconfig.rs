use crate::app::AppContext;
use crate::domain::{AppError, ContainerService};

/// Kubeconfig JSON for the cluster; `location` overrides the cluster's own.
pub fn execute(
    ctx: &AppContext,
    cs: &ContainerService,
    location: Option<&str>,
) -> Result<String, AppError> {
    ctx.generator(cs)?.kube_config(location)
}
