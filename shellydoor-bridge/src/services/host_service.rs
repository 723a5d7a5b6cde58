use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use shellydoor_core::{AccessoryInformation, DoorCharacteristics, DoorState};
use time::OffsetDateTime;
use tokio::sync::watch;

/// Latest characteristic values as pushed by the accessory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Characteristics {
    pub current: Option<DoorState>,
    pub target: Option<DoorState>,
    /// Set when the last status poll failed, cleared by the next current-state update.
    pub fault: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Default for Characteristics {
    fn default() -> Self {
        Self {
            current: None,
            target: None,
            fault: None,
            updated_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Host side of the accessory: keeps the characteristic values and fans
/// every change out to subscribers.
pub struct HostService {
    sender: watch::Sender<Characteristics>,
    information: RwLock<Option<AccessoryInformation>>,
}

impl HostService {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Characteristics::default());

        Self {
            sender,
            information: RwLock::new(None),
        }
    }

    pub fn characteristics(&self) -> Characteristics {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Characteristics> {
        self.sender.subscribe()
    }

    pub fn information(&self) -> Option<AccessoryInformation> {
        self.information
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, apply: impl FnOnce(&mut Characteristics)) {
        self.sender.send_modify(|characteristics| {
            apply(characteristics);
            characteristics.updated_at = OffsetDateTime::now_utc();
        });
    }
}

impl Default for HostService {
    fn default() -> Self {
        Self::new()
    }
}

impl DoorCharacteristics for HostService {
    fn current_door_state(&self) -> Option<DoorState> {
        self.sender.borrow().current
    }

    fn target_door_state(&self) -> Option<DoorState> {
        self.sender.borrow().target
    }

    fn update_current_door_state(&self, state: DoorState) {
        self.update(|characteristics| {
            characteristics.current = Some(state);
            characteristics.fault = None;
        });
    }

    fn update_target_door_state(&self, state: DoorState) {
        self.update(|characteristics| characteristics.target = Some(state));
    }

    fn report_failure(&self, reason: &str) {
        tracing::warn!("Current door state failed: {}", reason);
        self.update(|characteristics| characteristics.fault = Some(reason.to_string()));
    }

    fn publish_information(&self, information: &AccessoryInformation) {
        tracing::info!(
            "Publishing {} ({} {}, serial {}, firmware {})",
            information.name,
            information.manufacturer,
            information.model,
            information.serial_number,
            information.firmware_revision
        );

        *self
            .information
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(information.clone());
    }
}
