//! Error types for the demos.

use thiserror::Error;

use qflip_hal::HalError;
use qflip_ir::IrError;

/// Errors raised while building or running a demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The circuit could not be built.
    #[error(transparent)]
    Circuit(#[from] IrError),

    /// The backend rejected or failed the job.
    #[error(transparent)]
    Backend(#[from] HalError),
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
