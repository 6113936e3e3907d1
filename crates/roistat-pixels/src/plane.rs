//! Plane data - one retrieved 2D (z, c, t) slice
//!
//! Samples are widened to `f64` at retrieval so the statistics layer is
//! independent of the on-disk sample type, and addressed row-major as
//! `size_x * y + x`.

/// One 2D plane of pixel samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneData {
    size_x: u32,
    size_y: u32,
    samples: Vec<f64>,
}

impl PlaneData {
    /// Wrap a row-major sample vector as a plane.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != size_x * size_y`; callers construct
    /// planes from dimensions they already validated.
    pub fn new(size_x: u32, size_y: u32, samples: Vec<f64>) -> Self {
        assert_eq!(samples.len(), size_x as usize * size_y as usize);
        Self {
            size_x,
            size_y,
            samples,
        }
    }

    /// Plane width in pixels.
    pub fn size_x(&self) -> u32 {
        self.size_x
    }

    /// Plane height in pixels.
    pub fn size_y(&self) -> u32 {
        self.size_y
    }

    /// Get the sample at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.size_x || y >= self.size_y {
            return None;
        }
        self.samples
            .get(self.size_x as usize * y as usize + x as usize)
            .copied()
    }

    /// Get the sample at a raw row-major index.
    pub fn get_index(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    /// All samples in row-major order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}
