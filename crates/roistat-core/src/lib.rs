//! roistat-core - Shape model and area enumeration
//!
//! This crate provides the geometric foundation of the ROI statistics
//! engine:
//!
//! - [`Shape`] / [`ShapeGeometry`] - typed geometric primitives (point,
//!   line, rectangle, ellipse) with optional Z/T/Channel anchoring
//! - [`area_points`] / [`shape_points`] - enumeration of the integer
//!   pixel coordinates a shape covers
//! - [`random_shapes`] - explicit tagged-variant shape factory
//!
//! # Examples
//!
//! ```
//! use roistat_core::{Shape, point_count, shape_points};
//!
//! // A 2x2 rectangle covers exactly four pixels
//! let rect = Shape::rectangle(0.0, 0.0, 2.0, 2.0);
//! assert_eq!(point_count(&rect), 4);
//!
//! // Degenerate shapes enumerate nothing, they are not errors
//! let empty = Shape::rectangle(0.0, 0.0, -1.0, 2.0);
//! assert!(shape_points(&empty).is_empty());
//! ```

pub mod area;
pub mod error;
pub mod shape;

pub use area::{ShapePoints, area_points, point_count, shape_points};
pub use error::{Error, Result};
pub use shape::{
    MAX_RANDOM_SHAPES, PlaneAnchor, Shape, ShapeGeometry, ShapeId, ShapeKind, random_shape,
    random_shapes,
};
