//! Error types for roistat-pixels

use thiserror::Error;

use crate::dims::PixelsId;

/// Errors raised by pixel buffer access
#[derive(Debug, Error)]
pub enum PixelsError {
    /// Pixel set or plane data could not be read
    #[error("pixel data unavailable: {0}")]
    DataUnavailable(String),

    /// Plane or point coordinates outside the declared dimensions
    #[error("coordinate out of range: {axis}={value}, size={size}")]
    OutOfRange {
        axis: &'static str,
        value: u32,
        size: u32,
    },

    /// Pixel set requires tiled/pyramidal access, which whole-plane point
    /// iteration cannot serve
    #[error("pixel set {0} requires tiled/pyramidal access")]
    TiledUnsupported(PixelsId),

    /// Operation on a buffer that was already closed
    #[error("pixel buffer for set {0} already closed")]
    Closed(PixelsId),
}

/// Result type for pixel buffer operations
pub type PixelsResult<T> = Result<T, PixelsError>;
