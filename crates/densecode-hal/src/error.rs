//! Error types for the HAL crate.

use thiserror::Error;

/// Errors raised while validating, running or querying a job.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The circuit failed backend validation.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// The circuit needs more qubits than the backend offers.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Zero shots, or more than the backend allows.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// The job ran and failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job was cancelled before it produced a result.
    #[error("Job cancelled")]
    JobCancelled,

    /// No job with this id is known, or it has been evicted.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// `wait()` gave up polling.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// A backend config value could not be decoded.
    #[error("Backend config value is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Circuit or noise configuration rejected by the IR layer.
    #[error("IR error: {0}")]
    Ir(#[from] densecode_ir::IrError),

    /// Anything else the backend reports.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
