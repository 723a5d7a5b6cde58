//! Scripted stand-ins for the relay and the host, for tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tokio::time::{self, Instant};

use crate::errors::{TransportError, TransportErrorKind};
use crate::host::DoorCharacteristics;
use crate::models::{AccessoryInformation, DoorState};
use crate::services::{Actuator, ActuatorResponse};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub url: String,
    pub body: String,
    pub method: Method,
    pub at: Instant,
}

/// Actuator answering from a per-URL script. Unscripted URLs get `200` with an empty body.
#[derive(Default)]
pub struct MockActuator {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<HashMap<String, Result<ActuatorResponse, TransportErrorKind>>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        lock(&self.script).insert(
            url.to_string(),
            Ok(ActuatorResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, url: &str, kind: TransportErrorKind) {
        lock(&self.script).insert(url.to_string(), Err(kind));
    }

    /// Holds every answer for `url` back by `delay`.
    pub fn delay(&self, url: &str, delay: Duration) {
        lock(&self.delays).insert(url.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        lock(&self.calls).iter().filter(|call| call.url == url).count()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }
}

#[async_trait]
impl Actuator for MockActuator {
    async fn send(&self, url: &str, body: &str, method: &Method) -> Result<ActuatorResponse, TransportError> {
        lock(&self.calls).push(RecordedCall {
            url: url.to_string(),
            body: body.to_string(),
            method: method.clone(),
            at: Instant::now(),
        });

        let delay = lock(&self.delays).get(url).copied();
        if let Some(delay) = delay {
            time::sleep(delay).await;
        }

        match lock(&self.script).get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(kind)) => Err(TransportError::new(url, *kind, "scripted failure")),
            None => Ok(ActuatorResponse {
                status: 200,
                body: String::new(),
            }),
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    current: Option<DoorState>,
    target: Option<DoorState>,
    current_history: Vec<DoorState>,
    failures: Vec<String>,
    information: Option<AccessoryInformation>,
}

/// Host that remembers every value it was given.
#[derive(Debug, Default)]
pub struct RecordingCharacteristics {
    recorded: Mutex<Recorded>,
}

impl RecordingCharacteristics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_history(&self) -> Vec<DoorState> {
        lock(&self.recorded).current_history.clone()
    }

    pub fn failures(&self) -> Vec<String> {
        lock(&self.recorded).failures.clone()
    }

    pub fn information(&self) -> Option<AccessoryInformation> {
        lock(&self.recorded).information.clone()
    }
}

impl DoorCharacteristics for RecordingCharacteristics {
    fn current_door_state(&self) -> Option<DoorState> {
        lock(&self.recorded).current
    }

    fn target_door_state(&self) -> Option<DoorState> {
        lock(&self.recorded).target
    }

    fn update_current_door_state(&self, state: DoorState) {
        let mut recorded = lock(&self.recorded);
        recorded.current = Some(state);
        recorded.current_history.push(state);
    }

    fn update_target_door_state(&self, state: DoorState) {
        lock(&self.recorded).target = Some(state);
    }

    fn report_failure(&self, reason: &str) {
        lock(&self.recorded).failures.push(reason.to_string());
    }

    fn publish_information(&self, information: &AccessoryInformation) {
        lock(&self.recorded).information = Some(information.clone());
    }
}
