use super::{ConfigError, ExtractionError, TransportError};
use crate::models::DoorState;

#[derive(Debug, thiserror::Error)]
pub enum DoorError {
    #[error("Command to reach {target} failed: {source}")]
    Command {
        target: DoorState,
        #[source]
        source: TransportError,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid door state code {0}")]
    InvalidState(u8),
}
