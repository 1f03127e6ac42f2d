//! Reading order strategies for the global sequencer.
//!
//! After grouping, every column bucket has produced its own list of groups.
//! The sequencer merges them into the single order in which groups are
//! placed and emitted. That order drives collision resolution, so it is what
//! keeps reading order intact when groups get pushed down.
//!
//! # Available Strategies
//!
//! - [`RowBandStrategy`]: top-to-bottom rows, left-to-right within a row (default)
//! - [`ColumnMajorStrategy`]: column by column, top-to-bottom within a column

mod column_major;
mod row_band;

pub use column_major::ColumnMajorStrategy;
pub use row_band::RowBandStrategy;

use crate::layout::RenderGroup;
use crate::pipeline::config::{PackerConfig, ReadingOrderStrategyType};

/// Trait for ordering render groups for placement.
///
/// Implementations must be deterministic: the same input always yields the
/// same order, and groups with identical anchors keep their input order.
pub trait ReadingOrderStrategy: Send + Sync {
    /// Order groups for placement and emission.
    fn order(&self, groups: Vec<RenderGroup>) -> Vec<RenderGroup>;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// Create a reading order strategy based on configuration.
pub fn create_strategy(config: &PackerConfig) -> Box<dyn ReadingOrderStrategy> {
    match config.reading_order.strategy {
        ReadingOrderStrategyType::RowBand => {
            Box::new(RowBandStrategy::with_tolerance(config.row_tolerance_px))
        },
        ReadingOrderStrategyType::ColumnMajor => Box::new(ColumnMajorStrategy),
    }
}
