//! Layout reconstruction for measured slide elements.
//!
//! A flat list of absolutely positioned measurements carries none of the
//! structure that produced it. This module rebuilds enough of it to place
//! text sensibly:
//! - Column bucketing by left edge
//! - Paragraph grouping within each column
//! - Collision resolution of the inflated target footprints

pub mod collision;
pub mod column_detector;
pub mod measurement;
pub mod paragraph;

// Re-export main types
pub use collision::{resolve_collisions, CollisionParams, PlacedRect, PlacedSet};
pub use column_detector::{bucket_columns, ColumnBucket};
pub use measurement::{ElementKind, ElementMeasurement, ElementStyles};
pub use paragraph::{group_all, group_paragraphs, GroupingParams, RenderGroup};
