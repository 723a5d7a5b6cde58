use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::DoorError;

/// Position of the garage door as seen by the host.
///
/// The discriminants are the integer codes exchanged with the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open = 0,
    Closed = 1,
    Opening = 2,
    Closing = 3,
}

impl DoorState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DoorState::Open => "open",
            DoorState::Closed => "closed",
            DoorState::Opening => "opening",
            DoorState::Closing => "closing",
        }
    }

    /// True for the two in-between positions.
    pub fn is_moving(self) -> bool {
        matches!(self, DoorState::Opening | DoorState::Closing)
    }
}

impl TryFrom<u8> for DoorState {
    type Error = DoorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DoorState::Open),
            1 => Ok(DoorState::Closed),
            2 => Ok(DoorState::Opening),
            3 => Ok(DoorState::Closing),
            other => Err(DoorError::InvalidState(other)),
        }
    }
}

impl From<DoorState> for u8 {
    fn from(state: DoorState) -> Self {
        state.code()
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// One status reading and the state derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSample {
    /// Raw response body as returned by the status endpoint.
    pub raw: String,
    /// Scalar selected by the status key, `None` when the query matched nothing.
    pub value: Option<String>,
    pub state: DoorState,
    pub sampled_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSnapshot {
    pub current: DoorState,
    pub target: DoorState,
    pub is_moving: bool,
}

/// Metadata published on the host's accessory information service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryInformation {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_revision: String,
}
