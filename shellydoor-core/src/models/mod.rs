mod door;

pub use door::{AccessoryInformation, DoorSnapshot, DoorState, StatusSample};
