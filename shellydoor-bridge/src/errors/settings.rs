use std::io;
use std::path::PathBuf;

use shellydoor_core::errors::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("Invalid accessory configuration: {0}")]
    Accessory(#[from] ConfigError),
}
