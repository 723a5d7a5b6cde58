use shellydoor_core::errors::TransportErrorKind;
use shellydoor_core::services::DelayedAction;
use shellydoor_core::{DoorState, PendingActionPolicy};

mod common;
use common::{CLOSE_URL, OPEN_URL, advance_ms, build, config};

#[tokio::test(start_paused = true)]
async fn test_switch_off_fires_close_url_after_delay() {
    let mut config = config();
    config.switch_off = true;
    config.switch_off_delay = 2.0;
    let test = build(&config);

    test.door.request_target(DoorState::Open).await.unwrap();
    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 1);

    advance_ms(1990).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 0);

    advance_ms(20).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 0);

    // the relay pulse does not feed back into the door
    assert_eq!(test.door.current_state().await, DoorState::Open);
    assert_eq!(test.door.target_state().await, DoorState::Open);
}

#[tokio::test(start_paused = true)]
async fn test_switch_off_fires_even_while_door_is_moving() {
    let mut config = config();
    config.open_time = 10.0;
    config.switch_off = true;
    config.switch_off_delay = 2.0;
    let test = build(&config);

    test.door.request_target(DoorState::Open).await.unwrap();
    advance_ms(2010).await;

    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
    assert_eq!(test.door.current_state().await, DoorState::Opening);
}

#[tokio::test(start_paused = true)]
async fn test_switch_off_failure_is_swallowed() {
    let mut config = config();
    config.switch_off = true;
    config.switch_off_delay = 2.0;
    let test = build(&config);
    test.actuator.fail(CLOSE_URL, TransportErrorKind::Connect);

    test.door.request_target(DoorState::Open).await.unwrap();
    advance_ms(2010).await;

    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
    assert!(test.host.failures().is_empty());
    assert_eq!(test.door.current_state().await, DoorState::Open);
}

#[tokio::test(start_paused = true)]
async fn test_auto_lock_closes_through_the_door() {
    let mut config = config();
    config.auto_lock = true;
    config.auto_lock_delay = 3.0;
    let test = build(&config);

    test.door.request_target(DoorState::Open).await.unwrap();
    assert_eq!(test.door.scheduler().pending(DelayedAction::AutoLock), 1);

    advance_ms(1010).await;
    assert_eq!(test.door.current_state().await, DoorState::Open);

    advance_ms(2000).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
    assert_eq!(test.door.current_state().await, DoorState::Closing);
    assert_eq!(test.door.target_state().await, DoorState::Closed);

    advance_ms(1000).await;
    assert_eq!(test.door.current_state().await, DoorState::Closed);
    assert_eq!(
        test.host.current_history(),
        vec![DoorState::Opening, DoorState::Open, DoorState::Closing, DoorState::Closed]
    );
}

#[tokio::test(start_paused = true)]
async fn test_both_actions_arm_independently() {
    let mut config = config();
    config.switch_off = true;
    config.switch_off_delay = 2.0;
    config.auto_lock = true;
    config.auto_lock_delay = 5.0;
    let test = build(&config);

    test.door.request_target(DoorState::Open).await.unwrap();

    advance_ms(2010).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
    assert_eq!(test.door.current_state().await, DoorState::Open);

    advance_ms(3000).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 2);
    assert_eq!(test.door.current_state().await, DoorState::Closing);
}

#[tokio::test(start_paused = true)]
async fn test_close_request_arms_nothing() {
    let mut config = config();
    config.switch_off = true;
    config.auto_lock = true;
    let test = build(&config);

    test.door.request_target(DoorState::Closed).await.unwrap();

    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 0);
    assert_eq!(test.door.scheduler().pending(DelayedAction::AutoLock), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_open_arms_nothing() {
    let mut config = config();
    config.switch_off = true;
    config.auto_lock = true;
    let test = build(&config);
    test.actuator.fail(OPEN_URL, TransportErrorKind::Timeout);

    assert!(test.door.request_target(DoorState::Open).await.is_err());

    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 0);
    assert_eq!(test.door.scheduler().pending(DelayedAction::AutoLock), 0);
}

#[tokio::test(start_paused = true)]
async fn test_accumulate_keeps_every_pending_action() {
    let mut config = config();
    config.switch_off = true;
    config.switch_off_delay = 2.0;
    let test = build(&config);
    assert_eq!(test.door.scheduler().policy(), PendingActionPolicy::Accumulate);

    test.door.request_target(DoorState::Open).await.unwrap();
    advance_ms(500).await;
    test.door.request_target(DoorState::Open).await.unwrap();
    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 2);

    advance_ms(1510).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);

    advance_ms(500).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 2);
}

#[tokio::test(start_paused = true)]
async fn test_supersede_replaces_pending_action() {
    let mut config = config();
    config.switch_off = true;
    config.switch_off_delay = 2.0;
    config.pending_actions = PendingActionPolicy::Supersede;
    let test = build(&config);

    test.door.request_target(DoorState::Open).await.unwrap();
    advance_ms(500).await;
    test.door.request_target(DoorState::Open).await.unwrap();
    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 1);

    advance_ms(1600).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 0);

    advance_ms(500).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);

    advance_ms(5000).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_actions() {
    let mut config = config();
    config.switch_off = true;
    config.auto_lock = true;
    let test = build(&config);

    test.door.request_target(DoorState::Open).await.unwrap();
    assert_eq!(test.door.scheduler().cancel(DelayedAction::AutoLock), 1);
    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 1);

    test.door.shutdown().await;
    assert_eq!(test.door.scheduler().pending(DelayedAction::SwitchOff), 0);

    advance_ms(30_000).await;
    assert_eq!(test.actuator.calls_to(CLOSE_URL), 0);
}
