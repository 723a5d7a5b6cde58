use crate::models::{AccessoryInformation, DoorState};

/// Door characteristics owned by the host accessory framework.
///
/// The door publishes every change through this trait; the host keeps the
/// values it hands out to its own clients. Calls are synchronous and must
/// not block.
pub trait DoorCharacteristics: Send + Sync {
    fn current_door_state(&self) -> Option<DoorState>;

    fn target_door_state(&self) -> Option<DoorState>;

    fn update_current_door_state(&self, state: DoorState);

    fn update_target_door_state(&self, state: DoorState);

    /// Marks the current door state as unreliable, e.g. after a failed poll.
    fn report_failure(&self, reason: &str);

    fn publish_information(&self, information: &AccessoryInformation);
}
