#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use shellydoor_core::AccessoryConfig;
use shellydoor_core::mock::{MockActuator, RecordingCharacteristics};
use shellydoor_core::services::DoorStateMachine;

pub const OPEN_URL: &str = "http://relay.local/relay/0?turn=on";
pub const CLOSE_URL: &str = "http://relay.local/relay/0?turn=off";
pub const STATUS_URL: &str = "http://relay.local/status";

pub struct TestDoor {
    pub door: DoorStateMachine,
    pub actuator: Arc<MockActuator>,
    pub host: Arc<RecordingCharacteristics>,
}

/// One second to open, one second to close, nothing else enabled.
pub fn config() -> AccessoryConfig {
    let mut config = AccessoryConfig::new("Test Garage", OPEN_URL, CLOSE_URL);
    config.status_url = Some(STATUS_URL.to_string());
    config.open_time = 1.0;
    config.close_time = 1.0;
    config
}

pub fn build(config: &AccessoryConfig) -> TestDoor {
    let actuator = Arc::new(MockActuator::new());
    let host = Arc::new(RecordingCharacteristics::new());
    let door = DoorStateMachine::new(config, actuator.clone(), host.clone()).unwrap();

    TestDoor { door, actuator, host }
}

/// Sleeps on the paused test clock.
pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
