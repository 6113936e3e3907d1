//! Pixel buffer traits and scoped handle lifecycle
//!
//! [`PixelSource`] is the seam to whatever actually stores pixel data: it
//! resolves a [`PixelsId`] to declared dimensions and opens buffers.
//! [`PixelBuffer`] serves reads from one opened pixel set, either a whole
//! (z, c, t) plane or a single point.
//!
//! # Lifecycle
//!
//! Buffer handles are scoped resources. [`BufferGuard`] owns an open
//! buffer and closes it on drop, so release is guaranteed on both success
//! and failure paths. A failed close during unwind is logged rather than
//! escalated; the explicit [`BufferGuard::close`] reports it.

use log::error;

use crate::dims::{PixelDims, PixelsId};
use crate::error::PixelsResult;
use crate::plane::PlaneData;

/// Access to stored pixel sets.
pub trait PixelSource {
    /// Declared dimensions of a pixel set.
    ///
    /// # Errors
    ///
    /// [`crate::PixelsError::DataUnavailable`] if the pixel set is unknown.
    fn dims(&self, pixels: PixelsId) -> PixelsResult<PixelDims>;

    /// True if the pixel set is stored tiled/pyramidal.
    ///
    /// Whole-plane point iteration cannot serve such sets; callers must
    /// reject them up front instead of truncating silently.
    fn needs_pyramid(&self, pixels: PixelsId) -> PixelsResult<bool>;

    /// Open a buffer over the pixel set.
    fn open(&self, pixels: PixelsId) -> PixelsResult<BufferGuard>;
}

/// Reads over one opened pixel set.
pub trait PixelBuffer {
    /// The pixel set this buffer serves.
    fn pixels_id(&self) -> PixelsId;

    /// Declared dimensions of the underlying pixel set.
    fn dims(&self) -> PixelDims;

    /// Retrieve a whole (z, c, t) plane.
    ///
    /// # Errors
    ///
    /// [`crate::PixelsError::OutOfRange`] if the plane coordinates exceed
    /// the declared dimensions; [`crate::PixelsError::DataUnavailable`]
    /// if the underlying read fails.
    fn get_plane(&self, z: u32, c: u32, t: u32) -> PixelsResult<PlaneData>;

    /// Retrieve a single sample.
    fn get_value(&self, x: u32, y: u32, z: u32, c: u32, t: u32) -> PixelsResult<f64>;

    /// Release the buffer's resources.
    ///
    /// Called once by [`BufferGuard`]; implementations may treat repeated
    /// closes as errors.
    fn close(&mut self) -> PixelsResult<()>;
}

/// Scoped owner of an open [`PixelBuffer`].
///
/// Dereferences to the buffer for reads and closes it when dropped.
pub struct BufferGuard {
    buffer: Option<Box<dyn PixelBuffer>>,
}

impl BufferGuard {
    /// Take ownership of an opened buffer.
    pub fn new(buffer: Box<dyn PixelBuffer>) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    /// Close the buffer explicitly, surfacing any close failure.
    pub fn close(mut self) -> PixelsResult<()> {
        match self.buffer.take() {
            Some(mut buffer) => buffer.close(),
            None => Ok(()),
        }
    }
}

impl std::ops::Deref for BufferGuard {
    type Target = dyn PixelBuffer;

    fn deref(&self) -> &Self::Target {
        // Only `close(self)` and `drop` take the buffer out
        self.buffer
            .as_deref()
            .unwrap_or_else(|| unreachable!("buffer taken without consuming the guard"))
    }
}

impl Drop for BufferGuard {
    fn drop(&mut self) {
        if let Some(mut buffer) = self.buffer.take() {
            let id = buffer.pixels_id();
            if let Err(e) = buffer.close() {
                error!("error closing pixel buffer for set {id}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::PixelDims;
    use crate::error::PixelsError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBuffer {
        closes: Arc<AtomicUsize>,
    }

    impl PixelBuffer for CountingBuffer {
        fn pixels_id(&self) -> PixelsId {
            PixelsId(1)
        }

        fn dims(&self) -> PixelDims {
            PixelDims::plane(1, 1)
        }

        fn get_plane(&self, _z: u32, _c: u32, _t: u32) -> PixelsResult<PlaneData> {
            Err(PixelsError::DataUnavailable("test buffer".into()))
        }

        fn get_value(&self, _x: u32, _y: u32, _z: u32, _c: u32, _t: u32) -> PixelsResult<f64> {
            Err(PixelsError::DataUnavailable("test buffer".into()))
        }

        fn close(&mut self) -> PixelsResult<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_guard_closes_on_drop() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let _guard = BufferGuard::new(Box::new(CountingBuffer {
                closes: closes.clone(),
            }));
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_explicit_close_is_single() {
        let closes = Arc::new(AtomicUsize::new(0));
        let guard = BufferGuard::new(Box::new(CountingBuffer {
            closes: closes.clone(),
        }));
        guard.close().unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
