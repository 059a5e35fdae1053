//! Resolution of opted-in extensions into linked deployment templates.

use crate::domain::AppError;
use crate::domain::cluster::{ExtensionProfile, Properties};
use crate::domain::extensions::{
    ExtensionMode, ExtensionTarget, LoopPlan, SUPPORTED_ORCHESTRATORS_FILE, TEMPLATE_LINK_FILE,
    opted_in_mode, splice_linked_template,
};
use crate::ports::{ExtensionResourceRequest, ExtensionSource};

/// Fetches, validates and splices extension linked templates.
///
/// Requests run sequentially in (extension, master, pools) order, which is
/// also the order fragments appear in the output.
pub struct ExtensionResolver<'a, S: ExtensionSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ExtensionSource + ?Sized> ExtensionResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Linked-template text for every opted-in (extension, pool) pair.
    ///
    /// Each fragment is prefixed with `,`. The first failure aborts the whole
    /// resolution; no partial text is returned.
    pub fn linked_templates(&self, properties: &Properties) -> Result<String, AppError> {
        let orchestrator = properties.orchestrator_type();
        let mut result = String::new();

        for extension in &properties.extension_profiles {
            if let Some(master) = &properties.master_profile {
                if let Some(mode) = opted_in_mode(&extension.name, &master.extensions) {
                    tracing::info!(extension = %extension.name, ?mode, "master opted in to extension");
                    result.push(',');
                    result.push_str(&self.linked_template_text(
                        extension,
                        orchestrator,
                        &ExtensionTarget::Master,
                        mode,
                    )?);
                }
            }

            for pool in &properties.agent_pool_profiles {
                if let Some(mode) = opted_in_mode(&extension.name, &pool.extensions) {
                    tracing::info!(extension = %extension.name, pool = %pool.name, ?mode, "pool opted in to extension");
                    result.push(',');
                    result.push_str(&self.linked_template_text(
                        extension,
                        orchestrator,
                        &ExtensionTarget::Agent(pool),
                        mode,
                    )?);
                }
            }
        }

        Ok(result)
    }

    fn linked_template_text(
        &self,
        extension: &ExtensionProfile,
        orchestrator: &str,
        target: &ExtensionTarget<'_>,
        mode: ExtensionMode,
    ) -> Result<String, AppError> {
        self.ensure_orchestrator_supported(extension, orchestrator)?;
        let template = self.fetch(extension, TEMPLATE_LINK_FILE)?;
        let plan = LoopPlan::new(target, mode);
        Ok(splice_linked_template(&template, extension, target, &plan))
    }

    fn ensure_orchestrator_supported(
        &self,
        extension: &ExtensionProfile,
        orchestrator: &str,
    ) -> Result<(), AppError> {
        let body = self.fetch(extension, SUPPORTED_ORCHESTRATORS_FILE)?;
        let supported: Vec<String> =
            serde_json::from_str(&body).map_err(|e| AppError::ResourceFetch {
                extension: format!("{} {}", extension.name, extension.version),
                file: SUPPORTED_ORCHESTRATORS_FILE.to_string(),
                url: extension.resource_url(SUPPORTED_ORCHESTRATORS_FILE),
                reason: format!("unable to parse supported orchestrators: {}", e),
            })?;

        if !supported.iter().any(|o| o == orchestrator) {
            return Err(AppError::UnsupportedOrchestrator {
                extension: extension.name.clone(),
                version: extension.version.clone(),
                orchestrator: orchestrator.to_string(),
            });
        }
        Ok(())
    }

    fn fetch(&self, extension: &ExtensionProfile, file: &str) -> Result<String, AppError> {
        let request = ExtensionResourceRequest {
            extension: extension.name.clone(),
            version: extension.version.clone(),
            file: file.to_string(),
            url: extension.resource_url(file),
        };
        self.source.fetch(&request)
    }
}
