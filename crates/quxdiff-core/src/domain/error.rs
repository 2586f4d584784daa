//! Domain-level error taxonomy for quxdiff.

/// quxdiff domain errors.
#[derive(Debug, thiserror::Error)]
pub enum QuxError {
    #[error("invalid variant threshold: {0} (must lie in [0, 1])")]
    InvalidVariantThreshold(f64),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for quxdiff domain operations.
pub type Result<T> = std::result::Result<T, QuxError>;
