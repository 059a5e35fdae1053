//! armrender: expand cluster specifications into deployment template fragments.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::{
    AppContext,
    commands::{self, custom_script, kubeconfig, linked_templates, params, render},
    config::load_config,
};

pub use app::commands::render::RenderOptions;
pub use app::services::{TemplateGenerator, escape_single_line};
pub use domain::{AppError, ContainerService, EngineConfig, ParamsMap};

fn context(config: Option<&Path>) -> Result<AppContext, AppError> {
    AppContext::from_config(load_config(config)?)
}

/// Render one asset against the master profile or a named agent pool.
pub fn render(
    config: Option<&Path>,
    cluster: &Path,
    options: &RenderOptions,
) -> Result<String, AppError> {
    let ctx = context(config)?;
    let cs = commands::load_cluster(cluster)?;
    render::execute(&ctx, &cs, options)
}

/// Generate the kubeconfig document for a cluster.
pub fn kubeconfig(
    config: Option<&Path>,
    cluster: &Path,
    location: Option<&str>,
) -> Result<String, AppError> {
    let ctx = context(config)?;
    let cs = commands::load_cluster(cluster)?;
    kubeconfig::execute(&ctx, &cs, location)
}

/// Fetch and splice linked templates for every opted-in extension.
pub fn linked_templates(config: Option<&Path>, cluster: &Path) -> Result<String, AppError> {
    let ctx = context(config)?;
    let cs = commands::load_cluster(cluster)?;
    linked_templates::execute(&ctx, &cs)
}

/// Deployment parameters as JSON.
pub fn params(config: Option<&Path>, cluster: &Path) -> Result<String, AppError> {
    let ctx = context(config)?;
    let cs = commands::load_cluster(cluster)?;
    params::execute(&ctx, &cs)
}

/// Gzip and base64-encode a script file.
pub fn custom_script(path: &Path) -> Result<String, AppError> {
    custom_script::execute(path)
}
