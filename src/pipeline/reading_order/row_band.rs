//! Row-banded top-to-bottom, left-to-right reading order.

use crate::layout::RenderGroup;
use crate::utils::safe_float_cmp;

use super::ReadingOrderStrategy;

/// Top-to-bottom, left-to-right reading order with a row tolerance.
///
/// Groups whose tops lie within the tolerance of each other read as one row
/// and are ordered left to right; side-by-side columns that start at
/// essentially the same height therefore interleave row by row.
///
/// A plain comparator with a tolerance is not transitive, so rows are formed
/// explicitly: after a stable sort by `y`, the first group of a row admits
/// every following group whose top is less than the tolerance below its own.
/// Each row is then stably sorted by `x`.
pub struct RowBandStrategy {
    /// Maximum top-edge difference within one row (px, exclusive).
    row_tolerance_px: f32,
}

impl RowBandStrategy {
    /// Create a row-band strategy with the default 10px tolerance.
    pub fn new() -> Self {
        Self {
            row_tolerance_px: 10.0,
        }
    }

    /// Create a row-band strategy with a custom tolerance.
    pub fn with_tolerance(row_tolerance_px: f32) -> Self {
        Self { row_tolerance_px }
    }

    fn flush_row(row: &mut Vec<RenderGroup>, ordered: &mut Vec<RenderGroup>) {
        row.sort_by(|a, b| safe_float_cmp(a.x(), b.x()));
        ordered.append(row);
    }
}

impl Default for RowBandStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingOrderStrategy for RowBandStrategy {
    fn order(&self, mut groups: Vec<RenderGroup>) -> Vec<RenderGroup> {
        groups.sort_by(|a, b| safe_float_cmp(a.y(), b.y()));

        let mut ordered = Vec::with_capacity(groups.len());
        let mut row: Vec<RenderGroup> = Vec::new();
        let mut row_top = 0.0;
        let mut rows = 0;

        for group in groups {
            if !row.is_empty() && group.y() - row_top >= self.row_tolerance_px {
                Self::flush_row(&mut row, &mut ordered);
                rows += 1;
            }
            if row.is_empty() {
                row_top = group.y();
            }
            row.push(group);
        }
        if !row.is_empty() {
            Self::flush_row(&mut row, &mut ordered);
            rows += 1;
        }

        log::debug!(
            "Row-band ordering: {} groups in {} rows (tolerance={:.1}px)",
            ordered.len(),
            rows,
            self.row_tolerance_px
        );

        ordered
    }

    fn name(&self) -> &'static str {
        "RowBandStrategy"
    }
}
