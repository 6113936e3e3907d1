//! roistat-test - Regression test framework for the ROI statistics engine
//!
//! Provides a golden-value regression harness with three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (manual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use roistat_test::RegParams;
//!
//! let mut rp = RegParams::new("roi_stats");
//! rp.compare_values(3.5, stats.mean[0], 1e-9);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use roistat_pixels::{InMemoryPixelSet, PixelDims, PixelsResult};

/// Build a single-plane pixel set whose samples ramp 1, 2, 3, ... in
/// row-major order.
///
/// The 4x4 case yields `[[1,2,3,4],[5,6,7,8],[9,10,11,12],[13,14,15,16]]`,
/// the canonical fixture of the statistics regression tests.
pub fn ramp_plane(size_x: u32, size_y: u32) -> PixelsResult<InMemoryPixelSet> {
    let n = size_x as usize * size_y as usize;
    let samples: Vec<f64> = (1..=n).map(|v| v as f64).collect();
    InMemoryPixelSet::from_plane(size_x, size_y, samples)
}

/// Build a pixel set of the given dimensions with every sample set to
/// `value`.
pub fn constant_set(dims: PixelDims, value: f64) -> PixelsResult<InMemoryPixelSet> {
    InMemoryPixelSet::from_samples(dims, vec![value; dims.total_len()])
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // roistat-test is at crates/roistat-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
