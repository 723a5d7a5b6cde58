use regex::Regex;
use serde_json::Value;
use serde_json_path::JsonPath;
use time::OffsetDateTime;

use crate::configs::AccessoryConfig;
use crate::errors::{ConfigError, ExtractionError};
use crate::models::{DoorState, StatusSample};

/// Turns a status response body into a [`DoorState`].
///
/// The value selected by the status key is tested against the open, closed,
/// opening and closing patterns in that order. Patterns are unanchored, so
/// `"1"` also matches `"10"`. Anything that matches none of them reads as open.
pub struct StatusExtractor {
    key: String,
    path: Option<JsonPath>,
    patterns: [(DoorState, Regex); 4],
    debug: bool,
}

impl StatusExtractor {
    pub fn new(config: &AccessoryConfig) -> Result<Self, ConfigError> {
        let mut extractor = Self::with_patterns(
            &config.status_key,
            &config.status_value_open,
            &config.status_value_closed,
            &config.status_value_opening,
            &config.status_value_closing,
        )?;
        extractor.debug = config.debug;

        Ok(extractor)
    }

    pub fn with_patterns(
        status_key: &str,
        open: &str,
        closed: &str,
        opening: &str,
        closing: &str,
    ) -> Result<Self, ConfigError> {
        let path = if status_key.is_empty() {
            None
        } else {
            Some(
                JsonPath::parse(status_key).map_err(|e| ConfigError::InvalidStatusKey {
                    key: status_key.to_string(),
                    message: e.to_string(),
                })?,
            )
        };

        Ok(Self {
            key: status_key.to_string(),
            path,
            patterns: [
                (DoorState::Open, compile("statusValueOpen", open)?),
                (DoorState::Closed, compile("statusValueClosed", closed)?),
                (DoorState::Opening, compile("statusValueOpening", opening)?),
                (DoorState::Closing, compile("statusValueClosing", closing)?),
            ],
            debug: false,
        })
    }

    pub fn extract(&self, body: &str) -> Result<StatusSample, ExtractionError> {
        let value = self.select(body)?;
        let state = self.classify(value.as_deref());

        if self.debug {
            tracing::debug!(
                "Transformed status value from {:?} to {} ({})",
                value,
                state,
                self.key
            );
        }

        Ok(StatusSample {
            raw: body.to_string(),
            value,
            state,
            sampled_at: OffsetDateTime::now_utc(),
        })
    }

    /// Picks the first value matched by the status key out of `body`.
    pub fn select(&self, body: &str) -> Result<Option<String>, ExtractionError> {
        let Some(path) = &self.path else {
            return Ok(Some(body.to_string()));
        };

        let document: Value = serde_json::from_str(body)?;

        Ok(path.query(&document).first().map(scalar_text))
    }

    pub fn classify(&self, value: Option<&str>) -> DoorState {
        let Some(value) = value else {
            return DoorState::Open;
        };

        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(value))
            .map(|(state, _)| *state)
            .unwrap_or(DoorState::Open)
    }
}

fn compile(key: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { key, source })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
