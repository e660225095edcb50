use std::path::PathBuf;

use thiserror::Error;

/// Why a single path was refused by the safety validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("path is not absolute")]
    NotAbsolute,

    #[error("path matches protected location '{0}'")]
    Forbidden(String),

    #[error("path does not exist")]
    Missing,
}

/// A scan pass that could not complete as a whole.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("source '{source_name}' panicked: {message}")]
    SourcePanicked {
        source_name: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("refusing to clean batch: {path}: {reason}")]
    Rejected {
        path: PathBuf,
        reason: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid size '{value}': {reason}")]
    Size { value: String, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Clean(#[from] CleanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid item list: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
