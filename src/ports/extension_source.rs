//! Remote extension resource port definition.

use crate::domain::AppError;

/// One file requested from an extension's version directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionResourceRequest {
    /// Extension name.
    pub extension: String,
    /// Extension version.
    pub version: String,
    /// File name under the version directory.
    pub file: String,
    /// Fully built request URL, including any query string.
    pub url: String,
}

/// Port for fetching extension descriptors and linked templates.
///
/// Implementations perform a single blocking request per call; non-success
/// responses and transport failures both surface as `AppError::ResourceFetch`.
pub trait ExtensionSource: Send + Sync {
    fn fetch(&self, request: &ExtensionResourceRequest) -> Result<String, AppError>;
}
