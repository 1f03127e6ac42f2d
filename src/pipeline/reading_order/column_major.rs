//! Column-major reading order.

use crate::layout::RenderGroup;
use crate::utils::safe_float_cmp;

use super::ReadingOrderStrategy;

/// Column-by-column reading order.
///
/// Groups are ordered by the anchor of the column bucket they came from
/// (left to right), then top to bottom within each column. Suits slides
/// written as newspaper columns, where the left column is read to the end
/// before the right one begins.
pub struct ColumnMajorStrategy;

impl ReadingOrderStrategy for ColumnMajorStrategy {
    fn order(&self, mut groups: Vec<RenderGroup>) -> Vec<RenderGroup> {
        groups.sort_by(|a, b| {
            safe_float_cmp(a.column_anchor_x(), b.column_anchor_x())
                .then_with(|| safe_float_cmp(a.y(), b.y()))
        });
        log::debug!("Column-major ordering: {} groups", groups.len());
        groups
    }

    fn name(&self) -> &'static str {
        "ColumnMajorStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{bucket_columns, group_all, ElementKind, ElementMeasurement};
    use crate::layout::paragraph::GroupingParams;

    fn para(text: &str, x: f32, y: f32) -> ElementMeasurement {
        ElementMeasurement::new(ElementKind::Paragraph, x, y, 300.0, 40.0).with_text(text)
    }

    #[test]
    fn test_reads_left_column_first() {
        let elements = vec![
            para("R1", 700.0, 0.0),
            para("L1", 100.0, 0.0),
            para("R2", 700.0, 100.0),
            para("L2", 100.0, 100.0),
        ];
        let groups = group_all(&bucket_columns(elements, 50.0), &GroupingParams::default());

        let ordered = ColumnMajorStrategy.order(groups);
        let texts: Vec<&str> = ordered.iter().map(|g| g.first().text.as_str()).collect();
        assert_eq!(texts, vec!["L1", "L2", "R1", "R2"]);
    }

    #[test]
    fn test_column_members_use_bucket_anchor() {
        // B sits at x=120 but belongs to the bucket anchored at 100.
        let elements = vec![para("A", 100.0, 0.0), para("B", 120.0, 100.0), para("C", 700.0, 50.0)];
        let groups = group_all(&bucket_columns(elements, 50.0), &GroupingParams::default());

        let ordered = ColumnMajorStrategy.order(groups);
        let texts: Vec<&str> = ordered.iter().map(|g| g.first().text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }
}
