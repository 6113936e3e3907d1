//! In-memory pixel store
//!
//! Reference [`PixelSource`] implementation backed by owned `f64` sample
//! vectors. It is the fixture the engine tests run against and the
//! template for adapters over real storage. Samples are addressed
//! `[t][c][z][y][x]` row-major.
//!
//! The store counts currently-open buffers so tests can assert that the
//! engine never leaks a handle, including on failure paths.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::buffer::{BufferGuard, PixelBuffer, PixelSource};
use crate::dims::{PixelDims, PixelsId};
use crate::error::{PixelsError, PixelsResult};
use crate::plane::PlaneData;

/// One in-memory 5D pixel set.
#[derive(Debug, Clone)]
pub struct InMemoryPixelSet {
    dims: PixelDims,
    tiled: bool,
    samples: Vec<f64>,
}

impl InMemoryPixelSet {
    /// Create a zero-filled pixel set.
    pub fn new(dims: PixelDims) -> Self {
        Self {
            dims,
            tiled: false,
            samples: vec![0.0; dims.total_len()],
        }
    }

    /// Create a pixel set from `[t][c][z][y][x]` row-major samples.
    ///
    /// # Errors
    ///
    /// [`PixelsError::DataUnavailable`] if the sample count does not match
    /// the declared dimensions.
    pub fn from_samples(dims: PixelDims, samples: Vec<f64>) -> PixelsResult<Self> {
        if samples.len() != dims.total_len() {
            return Err(PixelsError::DataUnavailable(format!(
                "sample count {} does not match dimensions ({} expected)",
                samples.len(),
                dims.total_len()
            )));
        }
        Ok(Self {
            dims,
            tiled: false,
            samples,
        })
    }

    /// Create a single-plane pixel set from row-major samples.
    pub fn from_plane(size_x: u32, size_y: u32, samples: Vec<f64>) -> PixelsResult<Self> {
        Self::from_samples(PixelDims::plane(size_x, size_y), samples)
    }

    /// Mark the set as requiring tiled/pyramidal access.
    pub fn tiled(mut self) -> Self {
        self.tiled = true;
        self
    }

    /// Declared dimensions.
    pub fn dims(&self) -> PixelDims {
        self.dims
    }

    /// Overwrite one sample.
    pub fn set_value(&mut self, x: u32, y: u32, z: u32, c: u32, t: u32, value: f64) {
        if let Some(i) = self.sample_index(x, y, z, c, t) {
            self.samples[i] = value;
        }
    }

    /// Fill an entire (z, c, t) plane with one value.
    pub fn fill_plane(&mut self, z: u32, c: u32, t: u32, value: f64) {
        for y in 0..self.dims.size_y {
            for x in 0..self.dims.size_x {
                self.set_value(x, y, z, c, t, value);
            }
        }
    }

    fn sample_index(&self, x: u32, y: u32, z: u32, c: u32, t: u32) -> Option<usize> {
        let d = &self.dims;
        if x >= d.size_x || y >= d.size_y || z >= d.size_z || c >= d.size_c || t >= d.size_t {
            return None;
        }
        let plane = ((t as usize * d.size_c as usize + c as usize) * d.size_z as usize)
            + z as usize;
        Some(plane * d.plane_len() + d.size_x as usize * y as usize + x as usize)
    }
}

/// In-memory [`PixelSource`] over a set of pixel sets.
#[derive(Default)]
pub struct InMemoryPixelStore {
    sets: HashMap<PixelsId, Arc<InMemoryPixelSet>>,
    open_buffers: Arc<AtomicUsize>,
    total_opens: AtomicUsize,
}

impl InMemoryPixelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pixel set under an id.
    pub fn insert(&mut self, pixels: PixelsId, set: InMemoryPixelSet) {
        self.sets.insert(pixels, Arc::new(set));
    }

    /// Number of buffers currently open against this store.
    pub fn open_buffers(&self) -> usize {
        self.open_buffers.load(Ordering::SeqCst)
    }

    /// Number of buffers ever opened against this store.
    pub fn total_opens(&self) -> usize {
        self.total_opens.load(Ordering::SeqCst)
    }

    fn lookup(&self, pixels: PixelsId) -> PixelsResult<&Arc<InMemoryPixelSet>> {
        self.sets
            .get(&pixels)
            .ok_or_else(|| PixelsError::DataUnavailable(format!("unknown pixel set {pixels}")))
    }
}

impl PixelSource for InMemoryPixelStore {
    fn dims(&self, pixels: PixelsId) -> PixelsResult<PixelDims> {
        Ok(self.lookup(pixels)?.dims)
    }

    fn needs_pyramid(&self, pixels: PixelsId) -> PixelsResult<bool> {
        Ok(self.lookup(pixels)?.tiled)
    }

    fn open(&self, pixels: PixelsId) -> PixelsResult<BufferGuard> {
        let set = self.lookup(pixels)?.clone();
        self.open_buffers.fetch_add(1, Ordering::SeqCst);
        self.total_opens.fetch_add(1, Ordering::SeqCst);
        Ok(BufferGuard::new(Box::new(InMemoryBuffer {
            pixels,
            set,
            closed: false,
            open_buffers: self.open_buffers.clone(),
        })))
    }
}

/// Buffer over one registered pixel set.
struct InMemoryBuffer {
    pixels: PixelsId,
    set: Arc<InMemoryPixelSet>,
    closed: bool,
    open_buffers: Arc<AtomicUsize>,
}

impl InMemoryBuffer {
    fn check_open(&self) -> PixelsResult<()> {
        if self.closed {
            return Err(PixelsError::Closed(self.pixels));
        }
        Ok(())
    }
}

impl PixelBuffer for InMemoryBuffer {
    fn pixels_id(&self) -> PixelsId {
        self.pixels
    }

    fn dims(&self) -> PixelDims {
        self.set.dims
    }

    fn get_plane(&self, z: u32, c: u32, t: u32) -> PixelsResult<PlaneData> {
        self.check_open()?;
        let dims = self.set.dims;
        dims.check_plane(z, c, t)?;

        let mut samples = Vec::with_capacity(dims.plane_len());
        for y in 0..dims.size_y {
            for x in 0..dims.size_x {
                match self.set.sample_index(x, y, z, c, t) {
                    Some(i) => samples.push(self.set.samples[i]),
                    None => {
                        return Err(PixelsError::DataUnavailable(format!(
                            "plane (z={z}, c={c}, t={t}) of set {} truncated",
                            self.pixels
                        )));
                    }
                }
            }
        }
        Ok(PlaneData::new(dims.size_x, dims.size_y, samples))
    }

    fn get_value(&self, x: u32, y: u32, z: u32, c: u32, t: u32) -> PixelsResult<f64> {
        self.check_open()?;
        let dims = self.set.dims;
        dims.check_plane(z, c, t)?;
        if x >= dims.size_x {
            return Err(PixelsError::OutOfRange {
                axis: "x",
                value: x,
                size: dims.size_x,
            });
        }
        if y >= dims.size_y {
            return Err(PixelsError::OutOfRange {
                axis: "y",
                value: y,
                size: dims.size_y,
            });
        }
        match self.set.sample_index(x, y, z, c, t) {
            Some(i) => Ok(self.set.samples[i]),
            None => Err(PixelsError::DataUnavailable(format!(
                "sample ({x}, {y}, {z}, {c}, {t}) of set {} missing",
                self.pixels
            ))),
        }
    }

    fn close(&mut self) -> PixelsResult<()> {
        if self.closed {
            return Err(PixelsError::Closed(self.pixels));
        }
        self.closed = true;
        self.open_buffers.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_store() -> InMemoryPixelStore {
        // 4x4 single-plane ramp: 1..=16 row-major
        let samples: Vec<f64> = (1..=16).map(f64::from).collect();
        let set = InMemoryPixelSet::from_plane(4, 4, samples).unwrap();
        let mut store = InMemoryPixelStore::new();
        store.insert(PixelsId(1), set);
        store
    }

    #[test]
    fn test_get_value_addressing() {
        let store = ramp_store();
        let buf = store.open(PixelsId(1)).unwrap();
        assert_eq!(buf.get_value(0, 0, 0, 0, 0).unwrap(), 1.0);
        assert_eq!(buf.get_value(3, 0, 0, 0, 0).unwrap(), 4.0);
        assert_eq!(buf.get_value(0, 1, 0, 0, 0).unwrap(), 5.0);
        assert_eq!(buf.get_value(3, 3, 0, 0, 0).unwrap(), 16.0);
    }

    #[test]
    fn test_get_plane_matches_values() {
        let store = ramp_store();
        let buf = store.open(PixelsId(1)).unwrap();
        let plane = buf.get_plane(0, 0, 0).unwrap();
        assert_eq!(plane.get(1, 1), Some(6.0));
        assert_eq!(plane.samples().len(), 16);
    }

    #[test]
    fn test_plane_out_of_range() {
        let store = ramp_store();
        let buf = store.open(PixelsId(1)).unwrap();
        assert!(matches!(
            buf.get_plane(1, 0, 0),
            Err(PixelsError::OutOfRange { axis: "z", .. })
        ));
    }

    #[test]
    fn test_unknown_pixel_set() {
        let store = ramp_store();
        assert!(matches!(
            store.open(PixelsId(99)),
            Err(PixelsError::DataUnavailable(_))
        ));
        assert!(store.dims(PixelsId(99)).is_err());
    }

    #[test]
    fn test_open_buffer_accounting() {
        let store = ramp_store();
        assert_eq!(store.open_buffers(), 0);
        let buf = store.open(PixelsId(1)).unwrap();
        let buf2 = store.open(PixelsId(1)).unwrap();
        assert_eq!(store.open_buffers(), 2);
        drop(buf);
        assert_eq!(store.open_buffers(), 1);
        buf2.close().unwrap();
        assert_eq!(store.open_buffers(), 0);
        assert_eq!(store.total_opens(), 2);
    }

    #[test]
    fn test_tiled_flag() {
        let mut store = InMemoryPixelStore::new();
        store.insert(
            PixelsId(7),
            InMemoryPixelSet::new(PixelDims::plane(2, 2)).tiled(),
        );
        assert!(store.needs_pyramid(PixelsId(7)).unwrap());
    }

    #[test]
    fn test_multi_plane_addressing() {
        let dims = PixelDims::new(2, 2, 2, 2, 1);
        let mut set = InMemoryPixelSet::new(dims);
        set.fill_plane(0, 0, 0, 1.0);
        set.fill_plane(1, 0, 0, 2.0);
        set.fill_plane(0, 1, 0, 3.0);
        set.fill_plane(1, 1, 0, 4.0);

        let mut store = InMemoryPixelStore::new();
        store.insert(PixelsId(2), set);
        let buf = store.open(PixelsId(2)).unwrap();
        assert_eq!(buf.get_value(1, 1, 0, 0, 0).unwrap(), 1.0);
        assert_eq!(buf.get_value(0, 0, 1, 0, 0).unwrap(), 2.0);
        assert_eq!(buf.get_value(0, 0, 0, 1, 0).unwrap(), 3.0);
        assert_eq!(buf.get_value(0, 0, 1, 1, 0).unwrap(), 4.0);
    }
}
