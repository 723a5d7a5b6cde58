mod accessory;

pub use accessory::{AccessoryConfig, PendingActionPolicy, Timings};
