use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read category table {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse category table: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("category table validation failed: {0}")]
    Validation(String),
}
