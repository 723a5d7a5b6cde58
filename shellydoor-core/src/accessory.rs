use std::sync::Arc;

use tokio::sync::Mutex;

use crate::configs::AccessoryConfig;
use crate::errors::{ConfigError, DoorError};
use crate::host::DoorCharacteristics;
use crate::models::{AccessoryInformation, DoorSnapshot, DoorState};
use crate::services::{Actuator, DoorStateMachine, HttpActuator, PollOutcome, PollingHandle, PollingService};

/// A garage door opener accessory as the host framework sees it.
///
/// Wires the door, its delayed actions and the optional status polling to one
/// host collaborator.
pub struct GarageDoorOpener {
    information: AccessoryInformation,
    door: DoorStateMachine,
    host: Arc<dyn DoorCharacteristics>,
    polling: Option<PollingService>,
    poller: Mutex<Option<PollingHandle>>,
}

impl GarageDoorOpener {
    pub fn new(config: AccessoryConfig, host: Arc<dyn DoorCharacteristics>) -> Result<Self, ConfigError> {
        let actuator = Arc::new(HttpActuator::new(&config)?);
        Self::with_actuator(config, actuator, host)
    }

    pub fn with_actuator(
        config: AccessoryConfig,
        actuator: Arc<dyn Actuator>,
        host: Arc<dyn DoorCharacteristics>,
    ) -> Result<Self, ConfigError> {
        let door = DoorStateMachine::new(&config, actuator, Arc::clone(&host))?;
        let polling = config
            .timings()?
            .poll_interval
            .map(|interval| PollingService::new(door.clone(), interval))
            .transpose()?;

        Ok(Self {
            information: config.information(),
            door,
            host,
            polling,
            poller: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.information.name
    }

    pub fn information(&self) -> &AccessoryInformation {
        &self.information
    }

    pub fn door(&self) -> &DoorStateMachine {
        &self.door
    }

    /// Publishes the accessory information and brings the door state up.
    ///
    /// With polling, the status endpoint is queried right away and then on every
    /// interval. Without it the door starts closed and only moves on request.
    pub async fn start(&self) {
        self.host.publish_information(&self.information);

        match &self.polling {
            Some(polling) => {
                let handle = polling.spawn();
                if let Some(previous) = self.poller.lock().await.replace(handle) {
                    previous.stop();
                }
            }
            None => self.door.initialize(DoorState::Closed).await,
        }
    }

    pub fn identify(&self) {
        tracing::info!("Identify requested!");
    }

    /// Entry point for target changes coming from the host, as integer codes.
    pub async fn set_target_door_state(&self, code: u8) -> Result<(), DoorError> {
        let target = DoorState::try_from(code)?;
        self.door.request_target(target).await
    }

    pub async fn current_door_state(&self) -> DoorState {
        self.door.current_state().await
    }

    pub async fn target_door_state(&self) -> DoorState {
        self.door.target_state().await
    }

    pub async fn snapshot(&self) -> DoorSnapshot {
        self.door.snapshot().await
    }

    /// Polls the status endpoint now, outside the regular interval.
    pub async fn refresh(&self) -> Result<PollOutcome, DoorError> {
        self.door.poll().await
    }

    pub async fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .is_some_and(PollingHandle::is_running)
    }

    pub async fn shutdown(&self) {
        if let Some(poller) = self.poller.lock().await.take() {
            poller.stop();
        }

        self.door.shutdown().await;
        tracing::info!("Accessory {} stopped", self.information.name);
    }
}
