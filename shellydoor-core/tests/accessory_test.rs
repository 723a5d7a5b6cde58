use std::sync::Arc;

use shellydoor_core::errors::ConfigError;
use shellydoor_core::mock::{MockActuator, RecordingCharacteristics};
use shellydoor_core::{AccessoryConfig, DoorCharacteristics, DoorError, DoorState, GarageDoorOpener};

mod common;
use common::{CLOSE_URL, OPEN_URL, STATUS_URL, advance_ms, config};

struct TestAccessory {
    accessory: GarageDoorOpener,
    actuator: Arc<MockActuator>,
    host: Arc<RecordingCharacteristics>,
}

fn accessory(config: AccessoryConfig) -> TestAccessory {
    let actuator = Arc::new(MockActuator::new());
    let host = Arc::new(RecordingCharacteristics::new());
    let accessory = GarageDoorOpener::with_actuator(config, actuator.clone(), host.clone()).unwrap();

    TestAccessory {
        accessory,
        actuator,
        host,
    }
}

#[tokio::test(start_paused = true)]
async fn test_start_without_polling_initializes_closed() {
    let test = accessory(config());

    test.accessory.start().await;

    assert_eq!(test.host.current_door_state(), Some(DoorState::Closed));
    assert_eq!(test.host.target_door_state(), Some(DoorState::Closed));
    assert!(!test.accessory.is_polling().await);
    assert!(test.actuator.calls().is_empty());

    let information = test.host.information().unwrap();
    assert_eq!(information.name, "Test Garage");
    assert_eq!(information.model, env!("CARGO_PKG_NAME"));
}

#[tokio::test(start_paused = true)]
async fn test_configured_information_is_published() {
    let mut config = config();
    config.manufacturer = Some("Shelly".to_string());
    config.model = Some("1PM".to_string());
    config.serial = Some("A1B2".to_string());
    config.firmware = Some("1.14.0".to_string());
    let test = accessory(config);

    test.accessory.start().await;

    let information = test.host.information().unwrap();
    assert_eq!(information.manufacturer, "Shelly");
    assert_eq!(information.model, "1PM");
    assert_eq!(information.serial_number, "A1B2");
    assert_eq!(information.firmware_revision, "1.14.0");
}

#[tokio::test(start_paused = true)]
async fn test_start_with_polling_reads_status_first() {
    let mut config = config();
    config.polling = true;
    config.poll_interval = 5.0;
    let test = accessory(config);
    test.actuator.respond(STATUS_URL, 200, r#"{"inputs":[{"input":0}]}"#);

    test.accessory.start().await;
    advance_ms(10).await;

    assert!(test.accessory.is_polling().await);
    assert_eq!(test.actuator.calls_to(STATUS_URL), 1);
    assert_eq!(test.accessory.current_door_state().await, DoorState::Open);
    assert_eq!(test.accessory.target_door_state().await, DoorState::Open);

    advance_ms(5_000).await;
    assert_eq!(test.actuator.calls_to(STATUS_URL), 2);

    test.accessory.shutdown().await;
    assert!(!test.accessory.is_polling().await);

    advance_ms(20_000).await;
    assert_eq!(test.actuator.calls_to(STATUS_URL), 2);
}

#[tokio::test(start_paused = true)]
async fn test_target_codes_drive_the_door() {
    let test = accessory(config());
    test.accessory.start().await;

    test.accessory.set_target_door_state(0).await.unwrap();
    assert_eq!(test.actuator.calls_to(OPEN_URL), 1);
    advance_ms(1_010).await;
    assert_eq!(test.accessory.current_door_state().await, DoorState::Open);

    test.accessory.set_target_door_state(1).await.unwrap();
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
    advance_ms(1_010).await;

    let snapshot = test.accessory.snapshot().await;
    assert_eq!(snapshot.current, DoorState::Closed);
    assert_eq!(snapshot.target, DoorState::Closed);
    assert!(!snapshot.is_moving);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_target_code_is_rejected() {
    let test = accessory(config());
    test.accessory.start().await;

    let result = test.accessory.set_target_door_state(7).await;

    assert!(matches!(result, Err(DoorError::InvalidState(7))));
    assert!(test.actuator.calls().is_empty());
    assert_eq!(test.accessory.current_door_state().await, DoorState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_identify_does_not_touch_the_door() {
    let test = accessory(config());
    test.accessory.start().await;

    test.accessory.identify();

    assert!(test.actuator.calls().is_empty());
    assert_eq!(test.host.current_history(), vec![DoorState::Closed]);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_polls_on_demand() {
    let test = accessory(config());
    test.accessory.start().await;
    test.actuator.respond(STATUS_URL, 200, r#"{"inputs":[{"input":3}]}"#);

    test.accessory.refresh().await.unwrap();

    assert_eq!(test.accessory.current_door_state().await, DoorState::Closing);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_pending_work() {
    let mut config = config();
    config.auto_lock = true;
    config.auto_lock_delay = 2.0;
    let test = accessory(config);
    test.accessory.start().await;

    test.accessory.set_target_door_state(0).await.unwrap();
    test.accessory.shutdown().await;

    advance_ms(10_000).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 0);
    assert_eq!(test.accessory.current_door_state().await, DoorState::Opening);
}

#[test]
fn test_invalid_pattern_is_a_config_error() {
    let mut config = config();
    config.status_value_open = "(".to_string();

    let result = GarageDoorOpener::with_actuator(
        config,
        Arc::new(MockActuator::new()),
        Arc::new(RecordingCharacteristics::new()),
    );

    assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
}

#[test]
fn test_polling_without_status_url_is_a_config_error() {
    let mut config = config();
    config.polling = true;
    config.status_url = None;

    let result = GarageDoorOpener::with_actuator(
        config,
        Arc::new(MockActuator::new()),
        Arc::new(RecordingCharacteristics::new()),
    );

    assert!(matches!(result, Err(ConfigError::MissingStatusUrl)));
}

#[test]
fn test_invalid_method_is_a_config_error() {
    let mut config = config();
    config.http_method = "not a method".to_string();

    let result = GarageDoorOpener::new(config, Arc::new(RecordingCharacteristics::new()));

    assert!(matches!(result, Err(ConfigError::InvalidMethod(_))));
}
