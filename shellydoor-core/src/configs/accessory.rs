use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::AccessoryInformation;

/// What happens to pending switch-off/auto-lock timers when the door is opened again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingActionPolicy {
    /// Every open arms fresh timers, earlier ones still fire.
    #[default]
    Accumulate,
    /// Arming an action cancels the pending ones of the same kind.
    Supersede,
}

/// Accessory configuration, keyed the way the accessory table in the settings file is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryConfig {
    pub name: String,

    #[serde(rename = "openURL")]
    pub open_url: String,
    #[serde(rename = "closeURL")]
    pub close_url: String,
    #[serde(rename = "statusURL", default)]
    pub status_url: Option<String>,

    #[serde(default = "default_travel_time")]
    pub open_time: f64,
    #[serde(default = "default_travel_time")]
    pub close_time: f64,

    #[serde(default)]
    pub switch_off: bool,
    #[serde(default = "default_switch_off_delay")]
    pub switch_off_delay: f64,

    #[serde(default)]
    pub auto_lock: bool,
    #[serde(default = "default_auto_lock_delay")]
    pub auto_lock_delay: f64,

    #[serde(default)]
    pub pending_actions: PendingActionPolicy,

    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub firmware: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(rename = "http_method", default = "default_http_method")]
    pub http_method: String,

    #[serde(default)]
    pub polling: bool,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: f64,

    /// JSONPath selecting the status value. Empty means the whole body.
    #[serde(default = "default_status_key")]
    pub status_key: String,
    #[serde(default = "default_status_value_open")]
    pub status_value_open: String,
    #[serde(default = "default_status_value_closed")]
    pub status_value_closed: String,
    #[serde(default = "default_status_value_opening")]
    pub status_value_opening: String,
    #[serde(default = "default_status_value_closing")]
    pub status_value_closing: String,

    #[serde(default)]
    pub debug: bool,
}

fn default_travel_time() -> f64 {
    10.0
}

fn default_switch_off_delay() -> f64 {
    2.0
}

fn default_auto_lock_delay() -> f64 {
    20.0
}

fn default_timeout() -> u64 {
    3000
}

fn default_http_method() -> String {
    "GET".to_string()
}

fn default_poll_interval() -> f64 {
    120.0
}

fn default_status_key() -> String {
    "$.inputs[0].input".to_string()
}

fn default_status_value_open() -> String {
    "0".to_string()
}

fn default_status_value_closed() -> String {
    "1".to_string()
}

fn default_status_value_opening() -> String {
    "2".to_string()
}

fn default_status_value_closing() -> String {
    "3".to_string()
}

/// Validated timer durations derived from an [`AccessoryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub open_time: Duration,
    pub close_time: Duration,
    /// `None` when switch-off is disabled.
    pub switch_off_delay: Option<Duration>,
    /// `None` when auto-lock is disabled.
    pub auto_lock_delay: Option<Duration>,
    /// `None` when polling is disabled.
    pub poll_interval: Option<Duration>,
}

impl AccessoryConfig {
    /// Configuration with every optional key at its default.
    pub fn new<N, O, C>(name: N, open_url: O, close_url: C) -> Self
    where
        N: Into<String>,
        O: Into<String>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            open_url: open_url.into(),
            close_url: close_url.into(),
            status_url: None,
            open_time: default_travel_time(),
            close_time: default_travel_time(),
            switch_off: false,
            switch_off_delay: default_switch_off_delay(),
            auto_lock: false,
            auto_lock_delay: default_auto_lock_delay(),
            pending_actions: PendingActionPolicy::default(),
            manufacturer: None,
            serial: None,
            model: None,
            firmware: None,
            username: None,
            password: None,
            timeout: default_timeout(),
            http_method: default_http_method(),
            polling: false,
            poll_interval: default_poll_interval(),
            status_key: default_status_key(),
            status_value_open: default_status_value_open(),
            status_value_closed: default_status_value_closed(),
            status_value_opening: default_status_value_opening(),
            status_value_closing: default_status_value_closing(),
            debug: false,
        }
    }

    pub fn method(&self) -> Result<Method, ConfigError> {
        Method::from_bytes(self.http_method.to_uppercase().as_bytes())
            .map_err(|_| ConfigError::InvalidMethod(self.http_method.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Basic-auth pair, only when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }

    pub fn timings(&self) -> Result<Timings, ConfigError> {
        let poll_interval = if self.polling {
            let interval = seconds("pollInterval", self.poll_interval)?;
            if interval.is_zero() {
                return Err(ConfigError::InvalidDuration {
                    key: "pollInterval",
                    value: self.poll_interval,
                });
            }
            Some(interval)
        } else {
            None
        };

        Ok(Timings {
            open_time: seconds("openTime", self.open_time)?,
            close_time: seconds("closeTime", self.close_time)?,
            switch_off_delay: self
                .switch_off
                .then(|| seconds("switchOffDelay", self.switch_off_delay))
                .transpose()?,
            auto_lock_delay: self
                .auto_lock
                .then(|| seconds("autoLockDelay", self.auto_lock_delay))
                .transpose()?,
            poll_interval,
        })
    }

    /// Checks everything that can be checked without compiling patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.method()?;
        self.timings()?;

        if self.polling && self.status_url.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingStatusUrl);
        }

        Ok(())
    }

    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation {
            name: self.name.clone(),
            manufacturer: self
                .manufacturer
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_AUTHORS").to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
            serial_number: self
                .serial
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            firmware_revision: self
                .firmware
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}

fn seconds(key: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { key, value })
}
