//! Error types for roistat-core
//!
//! Provides a unified error type for shape model operations. The geometry
//! layer itself is mostly infallible: degenerate shapes enumerate zero
//! coordinates instead of failing, so the variants here cover only the
//! factory and parameter surface.

use thiserror::Error;

/// roistat-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested shape count outside the allowed range
    #[error("shape count out of bounds: {count} (allowed 1..={max})")]
    CountOutOfBounds { count: usize, max: usize },
}

/// Result type alias for shape model operations
pub type Result<T> = std::result::Result<T, Error>;
