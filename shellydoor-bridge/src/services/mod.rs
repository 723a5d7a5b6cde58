pub mod host_service;

pub use host_service::{Characteristics, HostService};
