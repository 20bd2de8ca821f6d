//! Error types for the protocol crate.

use thiserror::Error;

/// Errors raised while building, running or reporting the protocol.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// The message is not one of "00", "01", "10", "11".
    #[error("Invalid message: {0:?} (expected one of 00, 01, 10, 11)")]
    InvalidMessage(String),

    /// Gate-error angle is negative or not finite.
    #[error("Invalid error angle: {0} rad")]
    InvalidErrorAngle(f64),

    /// Shot count must be positive.
    #[error("Invalid shot count: {0}")]
    InvalidShots(u32),

    /// Configuration is malformed or out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Circuit construction failed.
    #[error("IR error: {0}")]
    Ir(#[from] densecode_ir::IrError),

    /// The simulator rejected or failed a job.
    #[error("Backend error: {0}")]
    Hal(#[from] densecode_hal::HalError),

    /// Writing an artifact or reading a config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid YAML for [`SuperdenseConfig`](crate::SuperdenseConfig).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
