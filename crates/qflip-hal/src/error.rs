//! Error types for the HAL crate.

use thiserror::Error;

/// Errors raised by backends and their results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No job with this id was submitted to the backend.
    #[error("Unknown job {0}")]
    JobNotFound(String),

    /// The job reached `Failed`.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job reached `Cancelled`.
    #[error("Job cancelled")]
    JobCancelled,

    /// `wait` gave up before the job reached a terminal state.
    #[error("Job {job_id} still pending after {polls} status polls")]
    Timeout {
        /// The job being waited on.
        job_id: String,
        /// Number of polls made.
        polls: u32,
    },

    /// The circuit uses operations the backend does not run.
    #[error("Circuit rejected: {0}")]
    InvalidCircuit(String),

    /// The circuit needs more qubits or memory than the backend has.
    #[error("Circuit too large: {0}")]
    CircuitTooLarge(String),

    /// Shot count outside `1..=max_shots`.
    #[error("Shot count {shots} outside 1..={max_shots}")]
    InvalidShots {
        /// Requested shots.
        shots: u32,
        /// Backend limit.
        max_shots: u32,
    },

    /// A `BackendConfig` entry is missing, mistyped or out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A result could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anything else the backend reports.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
