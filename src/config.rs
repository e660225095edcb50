use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::utils;

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_MIN_SIZE: u64 = utils::MIB;
pub const DEFAULT_PROGRAM_REMAINS_AGE_DAYS: u64 = 30;
pub const DEFAULT_BROWSER_CACHE_AGE_DAYS: u64 = 7;

/// Thresholds shared by every scan source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub max_depth: usize,
    /// Accepts a byte count or a human size such as `"1MB"`.
    #[serde(deserialize_with = "size_value")]
    pub min_size: u64,
    pub program_remains_age_days: u64,
    pub browser_cache_age_days: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_size: DEFAULT_MIN_SIZE,
            program_remains_age_days: DEFAULT_PROGRAM_REMAINS_AGE_DAYS,
            browser_cache_age_days: DEFAULT_BROWSER_CACHE_AGE_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetySettings {
    /// Appended to the built-in denylist. `{username}` is substituted.
    pub extra_denylist: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanSettings,
    pub safety: SafetySettings,
}

impl Settings {
    /// Default location: `<config dir>/tidywin/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tidywin").join("config.toml"))
    }

    /// Load from `path` if given, else from the default location when it
    /// exists, else fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_file(&p),
                None => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }
}

fn size_value<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bytes(u64),
        Human(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bytes(n) => Ok(n),
        Raw::Human(s) => utils::parse_size(&s).map_err(serde::de::Error::custom),
    }
}
