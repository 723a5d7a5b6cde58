pub mod actuator_service;
pub mod door_service;
pub mod polling_service;
pub mod scheduler_service;
pub mod status_extractor;

pub use actuator_service::{Actuator, ActuatorResponse, HttpActuator};
pub use door_service::{DoorStateMachine, PollOutcome};
pub use polling_service::{PollingHandle, PollingService};
pub use scheduler_service::{DelayedAction, DelayedActionScheduler};
pub use status_extractor::StatusExtractor;
