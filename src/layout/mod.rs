//! Layout core - masonry placement and visible-rect queries
//!
//! Pure, synchronous and free of I/O. The host supplies sizes through
//! [`MetricsProvider`]; the engine decides where every element goes and which
//! elements fall inside a rectangle.
//!
//! # Module Structure
//!
//! - `geometry`: Point, Size, EdgeInsets, Rect
//! - `attributes`: IndexPath, ElementKey, LayoutAttributes, AttributesStore
//! - `columns`: ColumnCount newtype and the per-section ColumnTracker
//! - `metrics`: MetricsProvider trait, LayoutDefaults, ResolvedMetrics, StaticMetrics
//! - `union_index`: UnionRectIndex - coarse spatial index over the flat attribute list
//! - `engine`: WaterfallLayout - the layout pass and its queries
//! - `error`: LayoutError

pub mod attributes;
pub mod columns;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod union_index;

pub use attributes::{
    AttributesStore, ElementKey, ElementKind, IndexPath, LayoutAttributes, SupplementaryKind,
};
pub use columns::{ColumnCount, ColumnTracker, InvalidColumnCount};
pub use engine::{item_width, LayoutSnapshot, WaterfallLayout};
pub use error::LayoutError;
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use metrics::{LayoutDefaults, MetricsProvider, ResolvedMetrics, SectionMetrics, StaticMetrics};
pub use union_index::UnionRectIndex;
