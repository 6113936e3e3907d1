//! Pixel set identity and dimensions
//!
//! A pixel set is a 5D array of samples ordered X, Y, Z (focal section),
//! C (channel), T (timepoint). [`PixelDims`] carries the declared extents
//! and the bounds predicates every access path checks against.

use crate::error::{PixelsError, PixelsResult};

/// Stable unique identifier of a pixel set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelsId(pub u64);

impl std::fmt::Display for PixelsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared extents of a 5D pixel set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDims {
    /// Width in pixels
    pub size_x: u32,
    /// Height in pixels
    pub size_y: u32,
    /// Number of Z sections
    pub size_z: u32,
    /// Number of channels
    pub size_c: u32,
    /// Number of timepoints
    pub size_t: u32,
}

impl PixelDims {
    /// Create dimensions for a 5D pixel set.
    pub fn new(size_x: u32, size_y: u32, size_z: u32, size_c: u32, size_t: u32) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
            size_c,
            size_t,
        }
    }

    /// Dimensions of a single-plane, single-channel image.
    pub fn plane(size_x: u32, size_y: u32) -> Self {
        Self::new(size_x, size_y, 1, 1, 1)
    }

    /// Number of samples in one (z, c, t) plane.
    pub fn plane_len(&self) -> usize {
        self.size_x as usize * self.size_y as usize
    }

    /// Total number of samples in the pixel set.
    pub fn total_len(&self) -> usize {
        self.plane_len()
            * self.size_z as usize
            * self.size_c as usize
            * self.size_t as usize
    }

    /// True if `(x, y)` lies within the XY extent.
    pub fn contains_xy(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.size_x && (y as u32) < self.size_y
    }

    /// Check that `(z, c, t)` addresses a declared plane.
    pub fn check_plane(&self, z: u32, c: u32, t: u32) -> PixelsResult<()> {
        if z >= self.size_z {
            return Err(PixelsError::OutOfRange {
                axis: "z",
                value: z,
                size: self.size_z,
            });
        }
        if c >= self.size_c {
            return Err(PixelsError::OutOfRange {
                axis: "c",
                value: c,
                size: self.size_c,
            });
        }
        if t >= self.size_t {
            return Err(PixelsError::OutOfRange {
                axis: "t",
                value: t,
                size: self.size_t,
            });
        }
        Ok(())
    }
}
