//! roistat-engine - ROI statistics aggregation and batch driver
//!
//! This crate computes per-shape and aggregate pixel statistics by
//! streaming area-enumerated coordinates against pixel planes:
//!
//! - [`StatsEngine`] - the batch driver: `get_stats` (full sweep),
//!   `get_stats_restricted` (bounded, plane-grouped), `get_points`
//! - [`ShapeStats`] / [`RoiStats`] - per-shape and combined records
//! - [`ShapeResolver`] - the seam supplying shape geometry and owning
//!   image/pixel-set identity
//!
//! # Examples
//!
//! ```
//! use roistat_core::{Shape, ShapeId};
//! use roistat_engine::{ImageId, InMemoryShapeIndex, StatsEngine};
//! use roistat_pixels::{InMemoryPixelSet, InMemoryPixelStore, PixelsId};
//!
//! // 2x2 image holding [[1, 2], [3, 4]]
//! let set = InMemoryPixelSet::from_plane(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let mut store = InMemoryPixelStore::new();
//! store.insert(PixelsId(1), set);
//!
//! let mut index = InMemoryShapeIndex::new();
//! index.insert(
//!     ShapeId(1),
//!     Shape::rectangle(0.0, 0.0, 2.0, 2.0).at_plane(0, 0),
//!     ImageId(1),
//!     PixelsId(1),
//! );
//!
//! let engine = StatsEngine::new(&index, &store);
//! let stats = engine.get_stats_restricted(&[ShapeId(1)], 0, 0, None).unwrap();
//! assert_eq!(stats[0].points_count[0], 4);
//! assert_eq!(stats[0].mean[0], 2.5);
//! ```

pub mod engine;
pub mod error;
pub mod resolver;
pub mod stats;

pub use engine::StatsEngine;
pub use error::{EngineError, EngineResult};
pub use resolver::{ImageId, InMemoryShapeIndex, ResolvedShape, ShapeResolver};
pub use stats::{ChannelAccumulator, RoiStats, ShapeStats, StatsAccumulator};
