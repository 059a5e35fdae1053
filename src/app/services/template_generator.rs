//! Template assembly over named assets.

use std::sync::Arc;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;

use crate::domain::cluster::{ContainerService, Properties};
use crate::domain::custom_script::base64_custom_script_from_bytes;
use crate::domain::kubeconfig::{KUBECONFIG_ASSET, render_kube_config};
use crate::domain::params::{ParamsMap, build_parameters};
use crate::domain::AppError;
use crate::ports::{AssetStore, ExtensionSource};

use super::addon_renderer;
use super::extension_resolver::ExtensionResolver;
use super::function_table::{self, FunctionContext};

/// Load, parse and execute one asset.
///
/// `register` installs the function table before parsing; `context` is the
/// root object the template executes against.
pub fn render_asset<F>(
    assets: &dyn AssetStore,
    name: &str,
    context: Value,
    register: F,
) -> Result<String, AppError>
where
    F: FnOnce(&mut Environment<'_>),
{
    let text = assets.get(name)?.ok_or_else(|| AppError::TemplateNotFound(name.to_string()))?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    register(&mut env);

    env.add_template(name, &text).map_err(|e| AppError::TemplateParse {
        asset: name.to_string(),
        reason: e.to_string(),
    })?;
    let template = env.get_template(name).map_err(|e| AppError::TemplateParse {
        asset: name.to_string(),
        reason: e.to_string(),
    })?;

    template.render(context).map_err(|e| AppError::TemplateExecution {
        asset: name.to_string(),
        reason: e.to_string(),
    })
}

/// Escape text so it can sit inside a JSON string literal.
pub fn escape_single_line(text: &str) -> String {
    text.replace('\\', "\\\\").replace("\r\n", "\\n").replace('\n', "\\n").replace('"', "\\\"")
}

/// Gzip + base64 of a named script asset.
pub fn base64_custom_script(assets: &dyn AssetStore, name: &str) -> Result<String, AppError> {
    let script =
        assets.get_bytes(name)?.ok_or_else(|| AppError::TemplateNotFound(name.to_string()))?;
    base64_custom_script_from_bytes(&script)
}

/// Renders assets against one cluster specification.
pub struct TemplateGenerator {
    location: String,
    functions: FunctionContext,
}

impl TemplateGenerator {
    pub fn new(
        cs: &ContainerService,
        assets: Arc<dyn AssetStore>,
        extensions: Arc<dyn ExtensionSource>,
    ) -> Result<Self, AppError> {
        let properties = cs
            .properties
            .clone()
            .ok_or_else(|| AppError::invalid_input("cluster specification has no properties"))?;
        Ok(Self {
            location: cs.location.clone(),
            functions: FunctionContext::new(properties, assets, extensions),
        })
    }

    pub fn properties(&self) -> &Properties {
        &self.functions.properties
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Expand a named asset against `profile`.
    pub fn single_line<P: Serialize + ?Sized>(&self, name: &str, profile: &P) -> Result<String, AppError> {
        tracing::debug!(asset = name, "rendering asset");
        render_asset(self.functions.assets.as_ref(), name, Value::from_serialize(profile), |env| {
            function_table::register(env, &self.functions)
        })
    }

    /// Expand a named asset and escape it for embedding in a JSON string.
    pub fn single_line_for_template<P: Serialize + ?Sized>(
        &self,
        name: &str,
        profile: &P,
    ) -> Result<String, AppError> {
        self.single_line(name, profile).map(|text| escape_single_line(&text))
    }

    pub fn base64_custom_script(&self, name: &str) -> Result<String, AppError> {
        base64_custom_script(self.functions.assets.as_ref(), name)
    }

    pub fn container_addons_string(&self, source_path: &str) -> Result<String, AppError> {
        addon_renderer::container_addons_string(
            self.properties(),
            self.functions.assets.as_ref(),
            source_path,
        )
    }

    pub fn linked_templates_for_extensions(&self) -> Result<String, AppError> {
        ExtensionResolver::new(self.functions.extensions.as_ref()).linked_templates(self.properties())
    }

    /// Kubeconfig for the cluster; `location` overrides the cluster's own.
    pub fn kube_config(&self, location: Option<&str>) -> Result<String, AppError> {
        let template = self
            .functions
            .assets
            .get(KUBECONFIG_ASSET)?
            .ok_or_else(|| AppError::TemplateNotFound(KUBECONFIG_ASSET.to_string()))?;
        render_kube_config(&template, Some(self.properties()), location.unwrap_or(&self.location))
    }

    pub fn parameters(&self) -> ParamsMap {
        build_parameters(self.properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{EmbeddedAssetStore, MemoryAssetStore};
    use crate::testing::FakeExtensionSource;
    use crate::testing::fixtures::{self, EXTENSION_ROOT, HELLO_TEMPLATE_LINK};

    fn generator(assets: MemoryAssetStore) -> TemplateGenerator {
        generator_with(assets, FakeExtensionSource::new())
    }

    fn generator_with(assets: MemoryAssetStore, source: FakeExtensionSource) -> TemplateGenerator {
        TemplateGenerator::new(&fixtures::cluster(), Arc::new(assets), Arc::new(source)).unwrap()
    }

    #[test]
    fn escape_single_line_handles_quotes_and_newlines() {
        assert_eq!(escape_single_line("a\\b\r\nc\n\"d\""), "a\\\\b\\nc\\n\\\"d\\\"");
    }

    #[test]
    fn renders_profile_fields_and_functions() {
        let assets = MemoryAssetStore::new().with_asset(
            "agent.yml",
            "name: {{ name }}\nstorage: {{ storage_account_type(vmSize) }}\nstart: {{ kubernetes_pod_start_index() }}\n",
        );
        let tg = generator(assets);
        let pool = tg.properties().agent_pool("linuxpool").unwrap().clone();
        let text = tg.single_line("agent.yml", &pool).unwrap();
        assert_eq!(text, "name: linuxpool\nstorage: Premium_LRS\nstart: 4\n");
    }

    #[test]
    fn single_line_for_template_escapes_output() {
        let assets = MemoryAssetStore::new().with_asset("s.sh", "echo \"{{ dnsPrefix }}\"\n");
        let tg = generator(assets);
        let master = tg.properties().master_profile.clone().unwrap();
        assert_eq!(tg.single_line_for_template("s.sh", &master).unwrap(), "echo \\\"demo\\\"\\n");
    }

    #[test]
    fn missing_asset_is_not_found() {
        let tg = generator(MemoryAssetStore::new());
        assert!(matches!(
            tg.single_line("nope.yml", &serde_json::json!({})),
            Err(AppError::TemplateNotFound(name)) if name == "nope.yml"
        ));
    }

    #[test]
    fn syntax_errors_name_the_asset() {
        let tg = generator(MemoryAssetStore::new().with_asset("bad.yml", "{{ name "));
        match tg.single_line("bad.yml", &serde_json::json!({"name": "x"})) {
            Err(AppError::TemplateParse { asset, .. }) => assert_eq!(asset, "bad.yml"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn undefined_fields_fail_execution() {
        let tg = generator(MemoryAssetStore::new().with_asset("x.yml", "{{ missing.field }}"));
        match tg.single_line("x.yml", &serde_json::json!({})) {
            Err(AppError::TemplateExecution { asset, .. }) => assert_eq!(asset, "x.yml"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn function_errors_fail_execution() {
        let tg = generator(
            MemoryAssetStore::new().with_asset("x.yml", "{{ storage_account_type(\"Standard\") }}"),
        );
        match tg.single_line("x.yml", &serde_json::json!({})) {
            Err(AppError::TemplateExecution { reason, .. }) => {
                assert!(reason.contains("Invalid sizeName: Standard"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn json_assets_are_not_auto_escaped() {
        let tg = generator(
            MemoryAssetStore::new().with_asset("frag.json", "[{{ vnet_address_prefixes() }}]"),
        );
        let text = tg.single_line("frag.json", &serde_json::json!({})).unwrap();
        assert!(text.starts_with("[\"[variables('masterSubnet')]\""));
    }

    #[test]
    fn network_functions_accept_port_lists() {
        let tg = generator(MemoryAssetStore::new().with_asset(
            "lb.json",
            "{{ security_rules([22, 443]) }}|{{ data_disks(\"linuxpool\") }}|{{ agent_extension_script_commands(\"linuxpool\") }}",
        ));
        let text = tg.single_line("lb.json", &serde_json::json!({})).unwrap();
        assert!(text.contains("\"priority\": 201,"));
        assert!(text.ends_with("||"));
    }

    #[test]
    fn linked_templates_are_available_as_a_function() {
        let mut cs = fixtures::cluster();
        if let Some(props) = cs.properties.as_mut() {
            props.extension_profiles = vec![fixtures::extension("hello")];
            props.agent_pool_profiles[0].extensions = vec![fixtures::opt_in("hello", "single")];
        }
        let source = FakeExtensionSource::new().with_extension(
            EXTENSION_ROOT,
            "hello",
            "v1",
            &["Kubernetes"],
            HELLO_TEMPLATE_LINK,
        );
        let assets = MemoryAssetStore::new()
            .with_asset("resources.json", "[{}{{ linked_templates_for_extensions() }}]");
        let tg = TemplateGenerator::new(&cs, Arc::new(assets), Arc::new(source)).unwrap();

        let text = tg.single_line("resources.json", &serde_json::json!({})).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["copy"]["count"], 1);
    }

    #[test]
    fn kube_config_uses_embedded_template() {
        let tg = TemplateGenerator::new(
            &fixtures::cluster(),
            Arc::new(EmbeddedAssetStore::new()),
            Arc::new(FakeExtensionSource::new()),
        )
        .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&tg.kube_config(None).unwrap()).unwrap();
        assert_eq!(doc["clusters"][0]["cluster"]["server"], "https://demo.westus2.cloudapp.azure.com");
    }

    fn embedded_generator() -> TemplateGenerator {
        TemplateGenerator::new(
            &fixtures::cluster(),
            Arc::new(EmbeddedAssetStore::new()),
            Arc::new(FakeExtensionSource::new()),
        )
        .unwrap()
    }

    #[test]
    fn embedded_vnet_renders_valid_json() {
        let tg = embedded_generator();
        let text = tg.single_line("k8s/vnet.json", &serde_json::json!({})).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["dependsOn"].as_array().unwrap().len(), 2);
        // master, two pools, one pod subnet per Windows VM
        assert_eq!(doc["properties"]["subnets"].as_array().unwrap().len(), 5);
        assert_eq!(
            doc["properties"]["addressSpace"]["addressPrefixes"].as_array().unwrap().len(),
            2
        );
    }

    #[test]
    fn embedded_agent_custom_data_uses_pool_fields() {
        let tg = embedded_generator();
        let pool = tg.properties().agent_pool("linuxpool").unwrap().clone();
        let text = tg.single_line("k8s/agentcustomdata.yml", &pool).unwrap();
        assert!(text.contains("agentpool=linuxpool,storageprofile=ManagedDisks,storagetier=Premium_LRS"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn catalog_is_built_from_the_cluster_extensions() {
        let mut cs = fixtures::cluster();
        if let Some(props) = cs.properties.as_mut() {
            props.extension_profiles = vec![fixtures::extension("prep")];
            props.agent_pool_profiles[0].preprovision_extension = Some(fixtures::opt_in("PREP", ""));
        }
        let assets = MemoryAssetStore::new()
            .with_asset("cmd.txt", "{{ agent_extension_script_commands(\"linuxpool\") }}");
        let tg = TemplateGenerator::new(&cs, Arc::new(assets), Arc::new(FakeExtensionSource::new()))
            .unwrap();

        assert!(tg.functions.catalog.get("prep").is_some());
        let text = tg.single_line("cmd.txt", &serde_json::json!({})).unwrap();
        assert!(text.contains("/opt/azure/containers/extensions/prep/prep.sh"));
    }

    #[test]
    fn custom_script_asset_keeps_raw_bytes() {
        let tg = generator(MemoryAssetStore::new().with_asset("legacy.sh", &b"echo caf\xe9\r\n"[..]));
        assert_eq!(
            tg.base64_custom_script("legacy.sh").unwrap(),
            base64_custom_script_from_bytes(b"echo caf\xe9\n").unwrap()
        );
    }

    #[test]
    fn non_utf8_template_is_a_read_error_not_missing() {
        let tg = generator(MemoryAssetStore::new().with_asset("bad.yml", &b"name: caf\xe9"[..]));
        let err = tg.single_line("bad.yml", &serde_json::json!({})).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn custom_script_requires_asset() {
        let tg = generator(MemoryAssetStore::new().with_asset("cse.sh", "echo hi\r\n"));
        assert!(!tg.base64_custom_script("cse.sh").unwrap().is_empty());
        assert!(matches!(tg.base64_custom_script("none.sh"), Err(AppError::TemplateNotFound(_))));
    }

    #[test]
    fn generator_requires_properties() {
        let cs = ContainerService::default();
        let result = TemplateGenerator::new(
            &cs,
            Arc::new(MemoryAssetStore::new()),
            Arc::new(FakeExtensionSource::new()),
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
