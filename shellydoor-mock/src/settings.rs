use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::simulate::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub initial: Position,
    /// Seconds the motor needs for a full move.
    pub travel_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub server: Server,
    pub door: Door,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/mock.toml"
        )))?;

        if !settings.door.travel_time.is_finite() || settings.door.travel_time < 0.0 {
            return Err(format!("Invalid travel time: {}", settings.door.travel_time).into());
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_settings_load() {
        let settings = Settings::new().unwrap();

        assert_eq!(settings.door.initial, Position::Closed);
        assert!(settings.door.travel_time > 0.0);
        assert!(!settings.server.host.is_empty());
    }
}
