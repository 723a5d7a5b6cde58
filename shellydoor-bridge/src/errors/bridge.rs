use std::io;
use std::net::AddrParseError;

use shellydoor_core::errors::ConfigError;

/// Failures that keep the bridge from serving.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Invalid accessory configuration: {0}")]
    Accessory(#[from] ConfigError),

    #[error("Invalid server address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] io::Error),
}
