pub mod config;
pub mod door;
pub mod extraction;
pub mod transport;

pub use config::ConfigError;
pub use door::DoorError;
pub use extraction::ExtractionError;
pub use transport::{TransportError, TransportErrorKind};
