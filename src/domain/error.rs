use std::io;

use thiserror::Error;

/// Library-wide error type for armrender operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Required profile data is missing or unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed value in the cluster specification (e.g. a VM size name).
    #[error("{0}")]
    Configuration(String),

    /// Engine configuration file is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Named asset is not present in the asset store.
    #[error("Template '{0}' does not exist")]
    TemplateNotFound(String),

    /// Asset text could not be parsed as a template.
    #[error("Error parsing template '{asset}': {reason}")]
    TemplateParse { asset: String, reason: String },

    /// Template execution failed (missing field or function error).
    #[error("Error executing template '{asset}': {reason}")]
    TemplateExecution { asset: String, reason: String },

    /// Extension does not list the current orchestrator as supported.
    #[error(
        "Orchestrator '{orchestrator}' not in list of supported orchestrators for extension '{extension}' version {version}"
    )]
    UnsupportedOrchestrator { extension: String, version: String, orchestrator: String },

    /// Remote extension resource could not be retrieved.
    #[error("Unable to GET extension resource '{file}' for extension '{extension}' at {url}: {reason}")]
    ResourceFetch { extension: String, file: String, url: String, reason: String },

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidInput(_)
            | AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::TemplateParse { .. }
            | AppError::TemplateExecution { .. }
            | AppError::UnsupportedOrchestrator { .. }
            | AppError::Json(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::TemplateNotFound(_) => io::ErrorKind::NotFound,
            AppError::ResourceFetch { .. } => io::ErrorKind::Other,
        }
    }
}
