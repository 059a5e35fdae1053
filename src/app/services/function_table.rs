//! Template functions bound to one cluster specification.

use std::sync::Arc;

use minijinja::{Environment, Error, ErrorKind};

use crate::domain::AppError;
use crate::domain::cluster::{AgentPoolProfile, Properties};
use crate::domain::extensions::{ExtensionCatalog, script_commands};
use crate::domain::network;
use crate::ports::{AssetStore, ExtensionSource};

use super::addon_renderer;
use super::extension_resolver::ExtensionResolver;
use super::template_generator::base64_custom_script;

/// Everything the function table closes over.
#[derive(Clone)]
pub struct FunctionContext {
    pub properties: Arc<Properties>,
    /// Extension profiles indexed once for every function call.
    pub catalog: Arc<ExtensionCatalog>,
    pub assets: Arc<dyn AssetStore>,
    pub extensions: Arc<dyn ExtensionSource>,
}

impl FunctionContext {
    pub fn new(
        properties: Properties,
        assets: Arc<dyn AssetStore>,
        extensions: Arc<dyn ExtensionSource>,
    ) -> Self {
        let catalog = Arc::new(ExtensionCatalog::new(&properties.extension_profiles));
        Self { properties: Arc::new(properties), catalog, assets, extensions }
    }
}

pub(crate) fn template_error(err: AppError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string())
}

fn pool<'a>(properties: &'a Properties, name: &str) -> Result<&'a AgentPoolProfile, Error> {
    properties.agent_pool(name).ok_or_else(|| {
        Error::new(ErrorKind::InvalidOperation, format!("agent pool '{}' not found", name))
    })
}

/// Storage tier for a VM size name such as `Standard_DS2_v2`.
pub fn storage_account_type(size_name: &str) -> Result<&'static str, AppError> {
    let mut parts = size_name.split('_');
    let capability = match (parts.next(), parts.next()) {
        (Some(_), Some(capability)) => capability,
        _ => return Err(AppError::config_error(format!("Invalid sizeName: {}", size_name))),
    };
    if capability.to_lowercase().contains('s') {
        Ok("Premium_LRS")
    } else {
        Ok("Standard_LRS")
    }
}

/// Quote a name as an inline template variable reference.
pub fn wrap_as_variable(name: &str) -> String {
    format!("',variables('{}'),'", name)
}

pub fn wrap_as_parameter(name: &str) -> String {
    format!("',parameters('{}'),'", name)
}

pub fn wrap_as_verbatim(expression: &str) -> String {
    format!("',{},'", expression)
}

/// Install the cluster-scoped function table.
pub fn register(env: &mut Environment<'_>, ctx: &FunctionContext) {
    env.add_function("wrap_as_variable", |name: String| wrap_as_variable(&name));
    env.add_function("wrap_as_parameter", |name: String| wrap_as_parameter(&name));
    env.add_function("wrap_as_verbatim", |expr: String| wrap_as_verbatim(&expr));
    env.add_function("storage_account_type", |size: String| -> Result<String, Error> {
        storage_account_type(&size).map(str::to_string).map_err(template_error)
    });

    {
        let props = ctx.properties.clone();
        env.add_function("is_kubernetes", move || props.is_kubernetes());
    }
    {
        let props = ctx.properties.clone();
        let catalog = ctx.catalog.clone();
        env.add_function("master_extension_script_commands", move || {
            script_commands::master_extension_script_commands(&props, &catalog)
        });
    }
    {
        let props = ctx.properties.clone();
        let catalog = ctx.catalog.clone();
        env.add_function(
            "agent_extension_script_commands",
            move |name: String| -> Result<String, Error> {
                let profile = pool(&props, &name)?;
                Ok(script_commands::agent_extension_script_commands(&catalog, profile))
            },
        );
    }

    {
        let props = ctx.properties.clone();
        env.add_function("vnet_address_prefixes", move || network::vnet_address_prefixes(&props));
    }
    {
        let props = ctx.properties.clone();
        env.add_function("vnet_subnet_dependencies", move || {
            network::vnet_subnet_dependencies(&props)
        });
    }
    {
        let props = ctx.properties.clone();
        env.add_function("vnet_subnets", move |add_nsg: bool| network::vnet_subnets(&props, add_nsg));
    }
    env.add_function("lb_rules", |name: String, ports: Vec<u32>| network::lb_rules(&name, &ports));
    env.add_function("probes", |ports: Vec<u32>| network::probes(&ports));
    env.add_function("security_rules", |ports: Vec<u32>| network::security_rules(&ports));
    {
        let props = ctx.properties.clone();
        env.add_function("data_disks", move |name: String| -> Result<String, Error> {
            Ok(network::data_disks(pool(&props, &name)?))
        });
    }
    {
        let props = ctx.properties.clone();
        env.add_function("kubernetes_subnets", move || -> Result<String, Error> {
            network::kubernetes_subnets(&props).map_err(template_error)
        });
    }
    {
        let props = ctx.properties.clone();
        env.add_function("kubernetes_pod_start_index", move || -> Result<u32, Error> {
            network::kubernetes_pod_start_index(&props).map_err(template_error)
        });
    }

    {
        let props = ctx.properties.clone();
        let extensions = ctx.extensions.clone();
        env.add_function("linked_templates_for_extensions", move || -> Result<String, Error> {
            ExtensionResolver::new(extensions.as_ref())
                .linked_templates(&props)
                .map_err(template_error)
        });
    }
    {
        let assets = ctx.assets.clone();
        env.add_function("base64_custom_script", move |name: String| -> Result<String, Error> {
            base64_custom_script(assets.as_ref(), &name).map_err(template_error)
        });
    }
    {
        let props = ctx.properties.clone();
        let assets = ctx.assets.clone();
        env.add_function(
            "container_addons_string",
            move |source_path: String| -> Result<String, Error> {
                addon_renderer::container_addons_string(&props, assets.as_ref(), &source_path)
                    .map_err(template_error)
            },
        );
    }
}
