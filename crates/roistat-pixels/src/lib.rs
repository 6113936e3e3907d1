//! roistat-pixels - 5D pixel buffer abstraction
//!
//! This crate defines the pixel access seam of the ROI statistics engine:
//!
//! - [`PixelDims`] / [`PixelsId`] - declared extents and identity of a
//!   5D (X, Y, Z, C, T) pixel set
//! - [`PixelSource`] / [`PixelBuffer`] - open/read traits over stored
//!   pixel data, with whole-plane and single-point access
//! - [`BufferGuard`] - scoped handle that guarantees buffer release
//! - [`InMemoryPixelStore`] - reference implementation backed by owned
//!   sample vectors
//!
//! # Examples
//!
//! ```
//! use roistat_pixels::{InMemoryPixelSet, InMemoryPixelStore, PixelSource, PixelsId};
//!
//! let set = InMemoryPixelSet::from_plane(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let mut store = InMemoryPixelStore::new();
//! store.insert(PixelsId(1), set);
//!
//! let buf = store.open(PixelsId(1)).unwrap();
//! assert_eq!(buf.get_value(1, 0, 0, 0, 0).unwrap(), 2.0);
//! // Dropping the guard closes the buffer
//! drop(buf);
//! assert_eq!(store.open_buffers(), 0);
//! ```

pub mod buffer;
pub mod dims;
pub mod error;
pub mod memory;
pub mod plane;

pub use buffer::{BufferGuard, PixelBuffer, PixelSource};
pub use dims::{PixelDims, PixelsId};
pub use error::{PixelsError, PixelsResult};
pub use memory::{InMemoryPixelSet, InMemoryPixelStore};
pub use plane::PlaneData;
