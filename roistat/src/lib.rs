//! roistat - Region-of-interest geometry and statistics
//!
//! Facade crate re-exporting the roistat workspace members:
//!
//! - [`core`] - shape model and area enumeration
//! - [`pixels`] - 5D pixel buffer abstraction
//! - [`engine`] - statistics aggregation and batch driver
//!
//! # Examples
//!
//! ```
//! use roistat::core::{Shape, ShapeId};
//! use roistat::engine::{ImageId, InMemoryShapeIndex, StatsEngine};
//! use roistat::pixels::{InMemoryPixelSet, InMemoryPixelStore, PixelsId};
//!
//! let set = InMemoryPixelSet::from_plane(3, 3, vec![7.0; 9]).unwrap();
//! let mut store = InMemoryPixelStore::new();
//! store.insert(PixelsId(1), set);
//!
//! let mut index = InMemoryShapeIndex::new();
//! index.insert(
//!     ShapeId(1),
//!     Shape::rectangle(0.0, 0.0, 3.0, 3.0),
//!     ImageId(1),
//!     PixelsId(1),
//! );
//!
//! let engine = StatsEngine::new(&index, &store);
//! let stats = engine.get_stats(&[ShapeId(1)]).unwrap();
//! assert_eq!(stats.per_shape[0].mean[0], 7.0);
//! ```

pub use roistat_core as core;
pub use roistat_engine as engine;
pub use roistat_pixels as pixels;
