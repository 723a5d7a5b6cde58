use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shellydoor_core::AccessoryConfig;

use crate::errors::SettingsError;

/// Environment variable pointing at an alternative settings file.
pub const CONFIG_PATH_VAR: &str = "SHELLYDOOR_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "configs/default.toml";

/// Variables that take precedence over the server and logger tables.
pub const SERVER_HOST_VAR: &str = "SHELLYDOOR_SERVER_HOST";
pub const SERVER_PORT_VAR: &str = "SHELLYDOOR_SERVER_PORT";
pub const LOGGER_LEVEL_VAR: &str = "SHELLYDOOR_LOGGER_LEVEL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub accessory: AccessoryConfig,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let path = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut settings = Self::from_path(&path)?;
        settings.apply_overrides(|key| env::var(key).ok())?;

        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }

    /// Parses and validates a settings document.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.accessory.validate()?;

        Ok(settings)
    }

    /// Replaces server and logger values with whatever `lookup` finds for them.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(SERVER_HOST_VAR) {
            self.server.host = host;
        }

        if let Some(port) = lookup(SERVER_PORT_VAR) {
            self.server.port = port.trim().parse().map_err(|_| SettingsError::InvalidOverride {
                key: SERVER_PORT_VAR,
                value: port.clone(),
            })?;
        }

        if let Some(level) = lookup(LOGGER_LEVEL_VAR) {
            self.logger.level = level;
        }

        Ok(())
    }
}
