//! Errors raised while loading or rendering site configuration.

/// Errors that can occur while loading configuration or rendering head tags.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid adapter reference: {0}")]
    AdapterError(String),

    #[error("Failed to render head template: {0}")]
    TemplateError(String),
}

impl From<minijinja::Error> for ConfigError {
    fn from(err: minijinja::Error) -> Self {
        Self::TemplateError(err.to_string())
    }
}
