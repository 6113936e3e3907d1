//! Shape model - typed geometric primitives for ROI analysis
//!
//! A [`Shape`] is an immutable geometric description in real-valued
//! coordinates, optionally anchored to a single Z section, timepoint, or
//! channel via [`PlaneAnchor`]. Shapes are read-only inputs to the
//! statistics engine; identity for result correlation is carried by
//! [`ShapeId`].
//!
//! # Validation
//!
//! Constructors perform no bounds or positivity checks. A rectangle with
//! negative width or an ellipse with a zero radius is a legal value that
//! enumerates zero pixel coordinates downstream, not a construction error.

mod factory;

pub use factory::{MAX_RANDOM_SHAPES, ShapeKind, random_shape, random_shapes};

/// Stable unique identifier of a shape.
///
/// Used to correlate statistics records with their source shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional Z/T/Channel attachment of a shape.
///
/// `None` in a field means the shape applies to all planes (or channels)
/// along that axis. The restricted batch query substitutes caller-supplied
/// fallback values instead of sweeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaneAnchor {
    /// Z section, or `None` for all sections
    pub z: Option<u32>,
    /// Timepoint, or `None` for all timepoints
    pub t: Option<u32>,
    /// Channel index, or `None` for all channels
    pub c: Option<u32>,
}

impl PlaneAnchor {
    /// Anchor to a single (z, t) plane, all channels.
    pub fn at(z: u32, t: u32) -> Self {
        Self {
            z: Some(z),
            t: Some(t),
            c: None,
        }
    }
}

/// Geometric description of a shape, in double-precision coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    /// A single point
    Point { x: f64, y: f64 },
    /// A line segment between two endpoints
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// An axis-aligned rectangle (top-left corner, width, height)
    Rectangle { x: f64, y: f64, w: f64, h: f64 },
    /// An axis-aligned ellipse (center, radii)
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
}

/// An immutable shape: geometry plus optional plane anchoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    /// The geometric primitive
    pub geometry: ShapeGeometry,
    /// Optional Z/T/Channel attachment
    pub anchor: PlaneAnchor,
}

impl Shape {
    /// Create a point shape.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            geometry: ShapeGeometry::Point { x, y },
            anchor: PlaneAnchor::default(),
        }
    }

    /// Create a line shape between `(x1, y1)` and `(x2, y2)`.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            geometry: ShapeGeometry::Line { x1, y1, x2, y2 },
            anchor: PlaneAnchor::default(),
        }
    }

    /// Create a rectangle shape with top-left corner `(x, y)`.
    ///
    /// Negative `w` or `h` is permitted and yields an empty area.
    pub fn rectangle(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            geometry: ShapeGeometry::Rectangle { x, y, w, h },
            anchor: PlaneAnchor::default(),
        }
    }

    /// Create an ellipse shape centered at `(cx, cy)` with radii `(rx, ry)`.
    ///
    /// Non-positive radii are permitted and yield an empty area.
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            geometry: ShapeGeometry::Ellipse { cx, cy, rx, ry },
            anchor: PlaneAnchor::default(),
        }
    }

    /// Return the same shape with a different plane anchor.
    pub fn with_anchor(mut self, anchor: PlaneAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Return the same shape anchored to a single (z, t) plane.
    pub fn at_plane(self, z: u32, t: u32) -> Self {
        self.with_anchor(PlaneAnchor {
            z: Some(z),
            t: Some(t),
            ..self.anchor
        })
    }

    /// Return the same shape restricted to a single channel.
    pub fn at_channel(self, c: u32) -> Self {
        self.with_anchor(PlaneAnchor {
            c: Some(c),
            ..self.anchor
        })
    }

    /// The kind of geometric primitive this shape carries.
    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            ShapeGeometry::Point { .. } => ShapeKind::Point,
            ShapeGeometry::Line { .. } => ShapeKind::Line,
            ShapeGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeGeometry::Ellipse { .. } => ShapeKind::Ellipse,
        }
    }
}
