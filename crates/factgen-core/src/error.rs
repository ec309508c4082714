use thiserror::Error;

/// Core error type shared across factgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The targets corpus is malformed or misses required fields.
    #[error("schema error at {path}: {message}")]
    Schema { path: String, message: String },
    /// The generator configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for results returned by factgen crates.
pub type Result<T> = std::result::Result<T, Error>;
