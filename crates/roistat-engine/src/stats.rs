//! Statistics records and running accumulation
//!
//! One [`ChannelAccumulator`] tracks running min/max/sum/sum-of-squares
//! per channel slot; [`StatsAccumulator`] owns the slots for one shape
//! (or for the combined aggregate) and finalizes into a [`ShapeStats`]
//! record.
//!
//! # Invariants
//!
//! - `mean = sum / points_count` when `points_count > 0`, else 0.
//! - `std_dev` is the sample standard deviation,
//!   `sqrt((sum_sq - sum^2/n) / (n - 1))`, defined only when `n > 1` and
//!   the computed variance is positive; otherwise 0. The positivity check
//!   guards against negative variance from floating-point cancellation.
//! - `min` initializes to `f64::MAX` and `max` to `f64::MIN`, so a shape
//!   that enumerates zero in-bounds points finalizes to a well-defined,
//!   non-NaN record distinguishable by `points_count == 0`.

use roistat_core::ShapeId;
use roistat_pixels::PixelsId;

use crate::resolver::ImageId;

/// Running per-channel accumulation state.
#[derive(Debug, Clone, Copy)]
pub struct ChannelAccumulator {
    min: f64,
    max: f64,
    sum: f64,
    sum_sq: f64,
    count: u64,
}

impl Default for ChannelAccumulator {
    fn default() -> Self {
        Self {
            min: f64::MAX,
            max: f64::MIN,
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
        }
    }
}

impl ChannelAccumulator {
    /// Fold one sample into the running state.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Number of samples folded in so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    fn mean(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }

    fn std_dev(&self) -> f64 {
        if self.count > 1 {
            let n = self.count as f64;
            let sigma_square = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
            if sigma_square > 0.0 {
                return sigma_square.sqrt();
            }
        }
        0.0
    }
}

/// Accumulation state for one statistics record, one slot per channel.
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    channel_ids: Vec<u32>,
    slots: Vec<ChannelAccumulator>,
}

impl StatsAccumulator {
    /// Create fresh accumulation slots for the given channels.
    pub fn new(channel_ids: Vec<u32>) -> Self {
        let slots = vec![ChannelAccumulator::default(); channel_ids.len()];
        Self { channel_ids, slots }
    }

    /// Channels this accumulator tracks, in slot order.
    pub fn channel_ids(&self) -> &[u32] {
        &self.channel_ids
    }

    /// Fold one sample into the slot at `index`.
    ///
    /// Out-of-range slots are ignored; slot indices come from the driver's
    /// own channel enumeration.
    pub fn add(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.add(value);
        }
    }

    /// Fold one sample into the slot tracking channel `channel`, if any.
    pub fn add_channel(&mut self, channel: u32, value: f64) {
        if let Some(index) = self.channel_ids.iter().position(|&c| c == channel) {
            self.slots[index].add(value);
        }
    }

    /// Finalize into a [`ShapeStats`] record.
    pub fn finish(self, shape_id: Option<ShapeId>) -> ShapeStats {
        let mut stats = ShapeStats {
            shape_id,
            channel_ids: self.channel_ids,
            min: Vec::with_capacity(self.slots.len()),
            max: Vec::with_capacity(self.slots.len()),
            sum: Vec::with_capacity(self.slots.len()),
            mean: Vec::with_capacity(self.slots.len()),
            std_dev: Vec::with_capacity(self.slots.len()),
            points_count: Vec::with_capacity(self.slots.len()),
        };
        for slot in &self.slots {
            stats.min.push(slot.min);
            stats.max.push(slot.max);
            stats.sum.push(slot.sum);
            stats.mean.push(slot.mean());
            stats.std_dev.push(slot.std_dev());
            stats.points_count.push(slot.count);
        }
        stats
    }
}

/// Per-shape statistics record.
///
/// All per-channel vectors are parallel to `channel_ids`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStats {
    /// Source shape, or `None` for a combined aggregate record
    pub shape_id: Option<ShapeId>,
    /// Channel indices, in slot order
    pub channel_ids: Vec<u32>,
    /// Minimum sample per channel (`f64::MAX` when no points)
    pub min: Vec<f64>,
    /// Maximum sample per channel (`f64::MIN` when no points)
    pub max: Vec<f64>,
    /// Sum of samples per channel
    pub sum: Vec<f64>,
    /// Mean per channel (0 when no points)
    pub mean: Vec<f64>,
    /// Sample standard deviation per channel (0 when fewer than 2 points)
    pub std_dev: Vec<f64>,
    /// Number of aggregated samples per channel
    pub points_count: Vec<u64>,
}

/// Full-query result: combined aggregate plus one record per shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiStats {
    /// Image the statistics were computed against (from the first shape)
    pub image_id: ImageId,
    /// Pixel set the statistics were computed against
    pub pixels_id: PixelsId,
    /// Aggregate across all constituent shapes' points
    pub combined: ShapeStats,
    /// One record per requested shape, in request order
    pub per_shape: Vec<ShapeStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample() {
        let mut acc = StatsAccumulator::new(vec![0]);
        acc.add(0, 42.5);
        let stats = acc.finish(Some(ShapeId(1)));
        assert_eq!(stats.min[0], 42.5);
        assert_eq!(stats.max[0], 42.5);
        assert_eq!(stats.mean[0], 42.5);
        assert_eq!(stats.std_dev[0], 0.0);
        assert_eq!(stats.points_count[0], 1);
    }

    #[test]
    fn test_vacuous_record_is_non_nan() {
        let stats = StatsAccumulator::new(vec![0]).finish(None);
        assert_eq!(stats.points_count[0], 0);
        assert_eq!(stats.min[0], f64::MAX);
        assert_eq!(stats.max[0], f64::MIN);
        assert_eq!(stats.mean[0], 0.0);
        assert_eq!(stats.std_dev[0], 0.0);
        assert!(!stats.mean[0].is_nan());
    }

    #[test]
    fn test_sample_std_dev() {
        // Values 1, 2, 5, 6: sum=14, sumSq=66, n=4
        // sigma^2 = (66 - 14*14/4) / 3 = 17/3
        let mut acc = StatsAccumulator::new(vec![0]);
        for v in [1.0, 2.0, 5.0, 6.0] {
            acc.add(0, v);
        }
        let stats = acc.finish(None);
        assert_eq!(stats.sum[0], 14.0);
        assert_eq!(stats.mean[0], 3.5);
        assert!((stats.std_dev[0] - (17.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_samples_zero_std_dev() {
        // Cancellation can push the computed variance slightly negative;
        // the guard must clamp it to zero
        let mut acc = StatsAccumulator::new(vec![0]);
        for _ in 0..1000 {
            acc.add(0, 0.1);
        }
        let stats = acc.finish(None);
        assert!(stats.std_dev[0] < 1e-6);
        assert!(stats.std_dev[0] >= 0.0);
    }

    #[test]
    fn test_negative_samples_tracked() {
        let mut acc = StatsAccumulator::new(vec![0]);
        acc.add(0, -7.0);
        acc.add(0, -3.0);
        let stats = acc.finish(None);
        assert_eq!(stats.min[0], -7.0);
        assert_eq!(stats.max[0], -3.0);
        assert_eq!(stats.mean[0], -5.0);
    }

    #[test]
    fn test_add_channel_routes_by_id() {
        let mut acc = StatsAccumulator::new(vec![2, 5]);
        acc.add_channel(5, 10.0);
        acc.add_channel(3, 99.0); // untracked channel, dropped
        let stats = acc.finish(None);
        assert_eq!(stats.points_count, vec![0, 1]);
        assert_eq!(stats.sum[1], 10.0);
    }
}
