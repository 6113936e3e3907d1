//! Shape resolution - from shape ids to geometry and owning pixel set
//!
//! The engine never stores shapes itself; a [`ShapeResolver`] supplies,
//! per [`ShapeId`], the geometry plus the image and pixel set the shape
//! was drawn on. [`InMemoryShapeIndex`] is the reference implementation
//! used by tests and embedding callers.

use std::collections::HashMap;

use roistat_core::{Shape, ShapeId};
use roistat_pixels::PixelsId;

use crate::error::{EngineError, EngineResult};

/// Stable unique identifier of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shape resolved to its geometry and owning image/pixel set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShape {
    /// The shape's id
    pub id: ShapeId,
    /// Geometry and plane anchoring
    pub shape: Shape,
    /// Image the shape was drawn on
    pub image_id: ImageId,
    /// Pixel set backing that image
    pub pixels_id: PixelsId,
}

/// Resolves shape ids to shapes.
pub trait ShapeResolver {
    /// Look up one shape.
    ///
    /// # Errors
    ///
    /// [`EngineError::DataUnavailable`] if no shape exists under `id`.
    fn resolve(&self, id: ShapeId) -> EngineResult<ResolvedShape>;
}

/// In-memory [`ShapeResolver`] backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryShapeIndex {
    shapes: HashMap<ShapeId, ResolvedShape>,
}

impl InMemoryShapeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape under an id, replacing any previous entry.
    pub fn insert(&mut self, id: ShapeId, shape: Shape, image_id: ImageId, pixels_id: PixelsId) {
        self.shapes.insert(
            id,
            ResolvedShape {
                id,
                shape,
                image_id,
                pixels_id,
            },
        );
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if no shapes are registered.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl ShapeResolver for InMemoryShapeIndex {
    fn resolve(&self, id: ShapeId) -> EngineResult<ResolvedShape> {
        self.shapes
            .get(&id)
            .copied()
            .ok_or_else(|| EngineError::DataUnavailable(format!("no shape with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_registered_shape() {
        let mut index = InMemoryShapeIndex::new();
        index.insert(ShapeId(1), Shape::point(1.0, 2.0), ImageId(10), PixelsId(20));

        let resolved = index.resolve(ShapeId(1)).unwrap();
        assert_eq!(resolved.image_id, ImageId(10));
        assert_eq!(resolved.pixels_id, PixelsId(20));
    }

    #[test]
    fn test_resolve_missing_shape() {
        let index = InMemoryShapeIndex::new();
        assert!(matches!(
            index.resolve(ShapeId(404)),
            Err(EngineError::DataUnavailable(_))
        ));
    }
}
