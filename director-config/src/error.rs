/// Errors produced while loading or persisting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config source: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
