//! Extension resource client implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use url::Url;

use crate::domain::{AppError, configuration::ExtensionFetchConfig};
use crate::ports::{ExtensionResourceRequest, ExtensionSource};

/// HTTP transport for extension descriptors and linked templates.
///
/// Performs one GET per call. There is no retry; a timeout applies only when
/// configured.
#[derive(Debug, Clone)]
pub struct HttpExtensionSource {
    client: Client,
}

impl HttpExtensionSource {
    pub fn new(config: &ExtensionFetchConfig) -> Result<Self, AppError> {
        // The blocking client defaults to a 30s timeout; clear it unless configured.
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn fetch_error(request: &ExtensionResourceRequest, reason: impl Into<String>) -> AppError {
    AppError::ResourceFetch {
        extension: format!("{} {}", request.extension, request.version),
        file: request.file.clone(),
        url: request.url.clone(),
        reason: reason.into(),
    }
}

impl ExtensionSource for HttpExtensionSource {
    fn fetch(&self, request: &ExtensionResourceRequest) -> Result<String, AppError> {
        let url = Url::parse(&request.url)
            .map_err(|e| fetch_error(request, format!("invalid URL: {}", e)))?;

        tracing::debug!(url = %url, extension = %request.extension, "fetching extension resource");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(request, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(fetch_error(
                request,
                format!(
                    "StatusCode: {}: Status: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown")
                ),
            ));
        }

        response.text().map_err(|e| fetch_error(request, format!("failed to read body: {}", e)))
    }
}
