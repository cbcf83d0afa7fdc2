use std::path::PathBuf;

/// Errors that can occur while loading the configuration store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("configuration is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The configuration file exceeds the size cap.
    #[error("configuration file too large ({size} bytes, max {max})")]
    TooLarge { size: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
