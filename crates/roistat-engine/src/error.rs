//! Error types for roistat-engine
//!
//! The engine surfaces one structured failure taxonomy to callers;
//! storage-layer errors are mapped into it rather than passed through raw.

use thiserror::Error;

use roistat_pixels::PixelsError;

/// Errors raised by statistics queries
#[derive(Debug, Error)]
pub enum EngineError {
    /// Empty or malformed request arguments
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Request inputs that contradict each other
    #[error("inconsistent input: {0}")]
    InconsistentInput(String),

    /// Fallback plane or channel selection outside declared bounds
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Pixel set storage the point-iteration strategy cannot serve
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// Shape record or pixel data could not be read
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

impl From<PixelsError> for EngineError {
    fn from(e: PixelsError) -> Self {
        match e {
            PixelsError::DataUnavailable(_) | PixelsError::Closed(_) => {
                EngineError::DataUnavailable(e.to_string())
            }
            PixelsError::OutOfRange { .. } => EngineError::OutOfRange(e.to_string()),
            PixelsError::TiledUnsupported(_) => EngineError::UnsupportedGeometry(e.to_string()),
        }
    }
}

/// Result type for statistics queries
pub type EngineResult<T> = Result<T, EngineError>;
