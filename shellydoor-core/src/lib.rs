//! Virtual garage door opener driving an HTTP relay.
//!
//! The door is modelled with four states. Opening and closing are simulated
//! with timers after the relay accepted the command, and an optional status
//! endpoint keeps the model in line with the real door while it is idle.

pub mod accessory;
pub mod configs;
pub mod errors;
pub mod host;
pub mod models;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use accessory::GarageDoorOpener;
pub use configs::{AccessoryConfig, PendingActionPolicy};
pub use errors::DoorError;
pub use host::DoorCharacteristics;
pub use models::{AccessoryInformation, DoorSnapshot, DoorState, StatusSample};
