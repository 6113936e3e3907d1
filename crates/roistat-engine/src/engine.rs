//! Statistics batch driver
//!
//! [`StatsEngine`] wires the collaborators together: shapes come from a
//! [`ShapeResolver`], pixel data from a [`PixelSource`], coordinates from
//! the area enumerator, and samples flow through fresh
//! [`StatsAccumulator`] state per request.
//!
//! Two query paths are deliberately kept distinct:
//!
//! - [`StatsEngine::get_stats`] is the convenience path: a shape without
//!   Z/T anchors is swept over the *entire* declared Z/T range of its
//!   pixel set, reading samples point by point. Exhaustive and expensive.
//! - [`StatsEngine::get_stats_restricted`] is the bounded production
//!   path: unanchored shapes use caller-supplied, validated fallback Z/T,
//!   shapes are grouped by effective (z, t) so each plane is loaded at
//!   most once per channel, and tiled pixel sets are rejected up front.
//!
//! All validation happens before any plane I/O. Buffers are guard-scoped,
//! so a failure mid-aggregation still releases them; the failed call
//! returns no partial results.

use std::collections::{BTreeMap, HashSet};

use log::warn;

use roistat_core::{ShapeId, ShapePoints, shape_points};
use roistat_pixels::PixelSource;

use crate::error::{EngineError, EngineResult};
use crate::resolver::{ResolvedShape, ShapeResolver};
use crate::stats::{RoiStats, ShapeStats, StatsAccumulator};

/// ROI statistics driver over a shape resolver and a pixel source.
pub struct StatsEngine<'a> {
    shapes: &'a dyn ShapeResolver,
    pixels: &'a dyn PixelSource,
}

impl<'a> StatsEngine<'a> {
    /// Create an engine over the given collaborators.
    pub fn new(shapes: &'a dyn ShapeResolver, pixels: &'a dyn PixelSource) -> Self {
        Self { shapes, pixels }
    }

    /// Enumerate the area points of a stored shape.
    ///
    /// # Errors
    ///
    /// [`EngineError::DataUnavailable`] if the shape id does not resolve.
    pub fn get_points(&self, id: ShapeId) -> EngineResult<ShapePoints> {
        let resolved = self.shapes.resolve(id)?;
        Ok(shape_points(&resolved.shape))
    }

    /// Compute full statistics for the given shapes.
    ///
    /// Per shape: the channel range is the anchored channel if set, else
    /// all channels; the Z/T range is the anchored plane if set, else the
    /// entire declared Z/T extent. Every shape's anchors are validated
    /// before the first buffer opens. The combined record aggregates every
    /// sample of every shape; its identity fields come from the first
    /// shape.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidArgument`] for an empty id list,
    /// [`EngineError::OutOfRange`] for an anchor outside the declared
    /// dimensions, [`EngineError::DataUnavailable`] for unresolvable
    /// shapes or failed reads.
    pub fn get_stats(&self, shape_ids: &[ShapeId]) -> EngineResult<RoiStats> {
        let resolved = self.resolve_all(shape_ids)?;
        let first = resolved[0];
        let first_dims = self.pixels.dims(first.pixels_id)?;

        if resolved.iter().any(|r| r.image_id != first.image_id) {
            // Tolerated here (unlike the restricted query), but the
            // combined record then only describes the first image
            warn!(
                "get_stats over shapes from multiple images; combined record covers image {}",
                first.image_id
            );
        }

        let mut combined = StatsAccumulator::new((0..first_dims.size_c).collect());

        // Validate every shape's anchors before the first buffer opens
        let mut sweeps = Vec::with_capacity(resolved.len());
        for r in &resolved {
            let dims = self.pixels.dims(r.pixels_id)?;
            let channels: Vec<u32> = match r.shape.anchor.c {
                Some(c) => {
                    if c >= dims.size_c {
                        return Err(EngineError::OutOfRange(format!(
                            "shape {} anchors channel {c}, pixel set has {}",
                            r.id, dims.size_c
                        )));
                    }
                    vec![c]
                }
                None => (0..dims.size_c).collect(),
            };
            let z_range = anchored_range(r, r.shape.anchor.z, "z", dims.size_z)?;
            let t_range = anchored_range(r, r.shape.anchor.t, "t", dims.size_t)?;
            sweeps.push((dims, channels, z_range, t_range));
        }

        let mut per_shape = Vec::with_capacity(resolved.len());
        for (r, (dims, channels, (z_start, z_end), (t_start, t_end))) in
            resolved.iter().zip(sweeps)
        {
            let mut acc = StatsAccumulator::new(channels.clone());
            let points = shape_points(&r.shape);

            let buf = self.pixels.open(r.pixels_id)?;
            let swept = (|| -> EngineResult<()> {
                for (x, y) in points.iter() {
                    if !dims.contains_xy(x, y) {
                        continue;
                    }
                    for (w, &c) in channels.iter().enumerate() {
                        for z in z_start..=z_end {
                            for t in t_start..=t_end {
                                let value = buf.get_value(x as u32, y as u32, z, c, t)?;
                                acc.add(w, value);
                                combined.add_channel(c, value);
                            }
                        }
                    }
                }
                Ok(())
            })();
            // On failure the guard's drop still closes the buffer
            swept?;
            buf.close().map_err(EngineError::from)?;

            per_shape.push(acc.finish(Some(r.id)));
        }

        Ok(RoiStats {
            image_id: first.image_id,
            pixels_id: first.pixels_id,
            combined: combined.finish(None),
            per_shape,
        })
    }

    /// Compute statistics restricted to explicit planes and channels.
    ///
    /// Shapes without Z/T anchors are pinned to `(z_fallback,
    /// t_fallback)`. `channels`, when non-empty, limits aggregation to
    /// those channel indices (slots come back in ascending channel
    /// order). Shapes are grouped by effective (z, t); result order
    /// follows the plane grouping, not the input order.
    ///
    /// # Errors
    ///
    /// All raised before any plane I/O: [`EngineError::InvalidArgument`]
    /// for an empty id list, [`EngineError::DataUnavailable`] for
    /// unresolvable ids, [`EngineError::InconsistentInput`] when shapes
    /// span images, [`EngineError::OutOfRange`] for invalid fallbacks,
    /// anchors, or channel filter entries, and
    /// [`EngineError::UnsupportedGeometry`] for tiled pixel sets.
    pub fn get_stats_restricted(
        &self,
        shape_ids: &[ShapeId],
        z_fallback: u32,
        t_fallback: u32,
        channels: Option<&[u32]>,
    ) -> EngineResult<Vec<ShapeStats>> {
        let resolved = self.resolve_all(shape_ids)?;
        let first = resolved[0];
        for r in &resolved[1..] {
            if r.image_id != first.image_id {
                return Err(EngineError::InconsistentInput(format!(
                    "shapes span images {} and {}",
                    first.image_id, r.image_id
                )));
            }
        }

        let dims = self.pixels.dims(first.pixels_id)?;
        if z_fallback >= dims.size_z || t_fallback >= dims.size_t {
            return Err(EngineError::OutOfRange(format!(
                "fallback (z={z_fallback}, t={t_fallback}) outside declared bounds \
                 ({}x{} planes)",
                dims.size_z, dims.size_t
            )));
        }

        let selected: Vec<u32> = match channels {
            Some(filter) if !filter.is_empty() => {
                for &c in filter {
                    if c >= dims.size_c {
                        return Err(EngineError::OutOfRange(format!(
                            "channel {c} outside declared bounds ({} channels)",
                            dims.size_c
                        )));
                    }
                }
                let wanted: HashSet<u32> = filter.iter().copied().collect();
                (0..dims.size_c).filter(|c| wanted.contains(c)).collect()
            }
            _ => (0..dims.size_c).collect(),
        };

        // Any point iteration over a tiled image is a lost cause
        if self.pixels.needs_pyramid(first.pixels_id)? {
            return Err(EngineError::UnsupportedGeometry(format!(
                "pixel set {} requires tiled/pyramidal access",
                first.pixels_id
            )));
        }

        // Group by effective (z, t) so each plane loads once per channel
        let mut groups: BTreeMap<(u32, u32), Vec<&ResolvedShape>> = BTreeMap::new();
        for r in &resolved {
            let z = r.shape.anchor.z.unwrap_or(z_fallback);
            let t = r.shape.anchor.t.unwrap_or(t_fallback);
            if z >= dims.size_z || t >= dims.size_t {
                return Err(EngineError::OutOfRange(format!(
                    "shape {} anchors plane (z={z}, t={t}) outside declared bounds",
                    r.id
                )));
            }
            groups.entry((z, t)).or_default().push(r);
        }

        let mut results = Vec::with_capacity(resolved.len());
        for (&(z, t), group) in &groups {
            let buf = self.pixels.open(first.pixels_id)?;
            let group_stats = (|| -> EngineResult<Vec<ShapeStats>> {
                let mut accs: Vec<StatsAccumulator> = group
                    .iter()
                    .map(|_| StatsAccumulator::new(selected.clone()))
                    .collect();
                let points: Vec<ShapePoints> =
                    group.iter().map(|r| shape_points(&r.shape)).collect();

                for (w, &c) in selected.iter().enumerate() {
                    let plane = buf.get_plane(z, c, t)?;
                    for (acc, pts) in accs.iter_mut().zip(&points) {
                        for (x, y) in pts.iter() {
                            // Points outside the image contribute nothing
                            if !dims.contains_xy(x, y) {
                                continue;
                            }
                            if let Some(value) = plane.get(x as u32, y as u32) {
                                acc.add(w, value);
                            }
                        }
                    }
                }

                Ok(group
                    .iter()
                    .zip(accs)
                    .map(|(r, acc)| acc.finish(Some(r.id)))
                    .collect())
            })();
            // On failure the guard's drop still closes the buffer
            let group_stats = group_stats?;
            buf.close().map_err(EngineError::from)?;
            results.extend(group_stats);
        }

        Ok(results)
    }

    fn resolve_all(&self, shape_ids: &[ShapeId]) -> EngineResult<Vec<ResolvedShape>> {
        if shape_ids.is_empty() {
            return Err(EngineError::InvalidArgument(
                "provide a non-empty list of shape ids".into(),
            ));
        }
        shape_ids.iter().map(|&id| self.shapes.resolve(id)).collect()
    }
}

/// Z or T sweep range: the anchored single plane, else the full extent.
fn anchored_range(
    shape: &ResolvedShape,
    anchor: Option<u32>,
    axis: &str,
    size: u32,
) -> EngineResult<(u32, u32)> {
    match anchor {
        Some(v) => {
            if v >= size {
                return Err(EngineError::OutOfRange(format!(
                    "shape {} anchors {axis}={v}, pixel set extent is {size}",
                    shape.id
                )));
            }
            Ok((v, v))
        }
        None => Ok((0, size.saturating_sub(1))),
    }
}
