//! Shape factory - explicit tagged-variant construction
//!
//! Replaces name-keyed registry lookup with a fixed [`ShapeKind`]
//! dispatch: the set of shape kinds is closed, so construction is a
//! `match`, not a runtime type discovery. Random generation is used by
//! load tests and demo data seeding.

use rand::{Rng, RngExt};

use super::{Shape, ShapeGeometry};
use crate::error::{Error, Result};

/// Upper bound on the number of shapes a single random batch may request.
pub const MAX_RANDOM_SHAPES: usize = 100_000;

/// Coordinate range used for randomly generated geometry.
const RANDOM_EXTENT: f64 = 512.0;

/// Discriminant for the fixed set of shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Single point
    Point,
    /// Line segment
    Line,
    /// Axis-aligned rectangle
    Rectangle,
    /// Axis-aligned ellipse
    Ellipse,
}

impl ShapeKind {
    /// All shape kinds, in dispatch order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Point,
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
    ];
}

/// Generate one random shape of the given kind.
///
/// Coordinates fall in `[0, 512)`; rectangle extents and ellipse radii in
/// `[1, 64]`, so generated shapes always enumerate at least one point.
pub fn random_shape<R: Rng>(kind: ShapeKind, rng: &mut R) -> Shape {
    let coord = |rng: &mut R| rng.random_range(0.0..RANDOM_EXTENT);
    let extent = |rng: &mut R| rng.random_range(1.0..=64.0);

    let geometry = match kind {
        ShapeKind::Point => ShapeGeometry::Point {
            x: coord(rng),
            y: coord(rng),
        },
        ShapeKind::Line => ShapeGeometry::Line {
            x1: coord(rng),
            y1: coord(rng),
            x2: coord(rng),
            y2: coord(rng),
        },
        ShapeKind::Rectangle => ShapeGeometry::Rectangle {
            x: coord(rng),
            y: coord(rng),
            w: extent(rng),
            h: extent(rng),
        },
        ShapeKind::Ellipse => ShapeGeometry::Ellipse {
            cx: coord(rng),
            cy: coord(rng),
            rx: extent(rng),
            ry: extent(rng),
        },
    };

    Shape {
        geometry,
        anchor: Default::default(),
    }
}

/// Generate `count` random shapes with kinds drawn uniformly.
///
/// # Errors
///
/// Returns [`Error::CountOutOfBounds`] if `count` is zero or exceeds
/// [`MAX_RANDOM_SHAPES`].
pub fn random_shapes<R: Rng>(count: usize, rng: &mut R) -> Result<Vec<Shape>> {
    if count == 0 || count > MAX_RANDOM_SHAPES {
        return Err(Error::CountOutOfBounds {
            count,
            max: MAX_RANDOM_SHAPES,
        });
    }

    let mut shapes = Vec::with_capacity(count);
    while shapes.len() < count {
        let which = rng.random_range(0..ShapeKind::ALL.len());
        shapes.push(random_shape(ShapeKind::ALL[which], rng));
    }
    Ok(shapes)
}
