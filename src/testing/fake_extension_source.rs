use crate::domain::AppError;
use crate::ports::{ExtensionResourceRequest, ExtensionSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Extension source serving canned bodies keyed by URL.
#[derive(Clone, Default)]
pub struct FakeExtensionSource {
    pub bodies: HashMap<String, String>,
    pub requests: Arc<Mutex<Vec<ExtensionResourceRequest>>>,
}

impl FakeExtensionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Publish both descriptor files for an extension under `root`.
    pub fn with_extension(
        self,
        root: &str,
        name: &str,
        version: &str,
        orchestrators: &[&str],
        template_link: &str,
    ) -> Self {
        let base = format!("{}extensions/{}/{}", root, name, version);
        let supported = serde_json::to_string(orchestrators).unwrap();
        self.with_body(format!("{}/supported-orchestrators.json", base), supported)
            .with_body(format!("{}/template-link.json", base), template_link)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.url.clone()).collect()
    }
}

impl ExtensionSource for FakeExtensionSource {
    fn fetch(&self, request: &ExtensionResourceRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.bodies.get(&request.url).cloned().ok_or_else(|| AppError::ResourceFetch {
            extension: request.extension.clone(),
            file: request.file.clone(),
            url: request.url.clone(),
            reason: "StatusCode: 404: Status: Not Found".to_string(),
        })
    }
}
