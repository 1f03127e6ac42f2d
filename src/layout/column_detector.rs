//! Column bucketing by left-edge proximity.
//!
//! Multi-column slides give every visual column a roughly constant left
//! edge. Scanning the measurements in report order, each element joins the
//! first bucket whose anchor lies within the proximity threshold, or opens a
//! new bucket anchored at its own `x`.
//!
//! Buckets keep the order in which they were opened and are never re-sorted
//! by `x`; the global sequencer decides reading order later.

use crate::layout::measurement::ElementMeasurement;

/// A run of measurements sharing a left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBucket {
    /// `x` of the element that opened the bucket (px)
    pub anchor_x: f32,
    /// Members in report order
    pub elements: Vec<ElementMeasurement>,
}

impl ColumnBucket {
    fn open(element: ElementMeasurement) -> Self {
        Self {
            anchor_x: element.x,
            elements: vec![element],
        }
    }

    /// Whether an element with left edge `x` belongs to this bucket.
    pub fn accepts(&self, x: f32, threshold: f32) -> bool {
        (x - self.anchor_x).abs() < threshold
    }
}

/// Bucket measurements into columns.
///
/// # Arguments
///
/// * `elements` - Placeable measurements (structural kinds already removed)
/// * `threshold` - Maximum exclusive left-edge distance to a bucket anchor (px)
///
/// # Examples
///
/// ```
/// use slide_oxide::layout::{bucket_columns, ElementKind, ElementMeasurement};
///
/// let elements = vec![
///     ElementMeasurement::new(ElementKind::Paragraph, 100.0, 0.0, 300.0, 20.0),
///     ElementMeasurement::new(ElementKind::Paragraph, 140.0, 40.0, 300.0, 20.0),
///     ElementMeasurement::new(ElementKind::Paragraph, 700.0, 0.0, 300.0, 20.0),
/// ];
///
/// let buckets = bucket_columns(elements, 50.0);
/// assert_eq!(buckets.len(), 2);
/// assert_eq!(buckets[0].elements.len(), 2);
/// ```
pub fn bucket_columns(elements: Vec<ElementMeasurement>, threshold: f32) -> Vec<ColumnBucket> {
    let mut buckets: Vec<ColumnBucket> = Vec::new();

    for element in elements {
        match buckets.iter_mut().find(|b| b.accepts(element.x, threshold)) {
            Some(bucket) => bucket.elements.push(element),
            None => buckets.push(ColumnBucket::open(element)),
        }
    }

    log::debug!("Column bucketing: {} buckets (threshold={:.1}px)", buckets.len(), threshold);

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measurement::ElementKind;

    fn text_at(x: f32, y: f32) -> ElementMeasurement {
        ElementMeasurement::new(ElementKind::GenericText, x, y, 200.0, 20.0).with_text("line")
    }

    #[test]
    fn test_empty_input() {
        assert!(bucket_columns(Vec::new(), 50.0).is_empty());
    }

    #[test]
    fn test_within_threshold_shares_bucket() {
        let buckets = bucket_columns(vec![text_at(100.0, 0.0), text_at(140.0, 30.0)], 50.0);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].anchor_x, 100.0);
        assert_eq!(buckets[0].elements.len(), 2);
    }

    #[test]
    fn test_beyond_threshold_opens_bucket() {
        let buckets = bucket_columns(vec![text_at(100.0, 0.0), text_at(160.0, 30.0)], 50.0);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[1].anchor_x, 160.0);
    }

    #[test]
    fn test_exact_threshold_is_exclusive() {
        let buckets = bucket_columns(vec![text_at(100.0, 0.0), text_at(150.0, 30.0)], 50.0);
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_anchor_is_first_element_not_running_mean() {
        // 140 joins the 100 bucket, but 180 is measured against 100, not 140.
        let buckets = bucket_columns(
            vec![text_at(100.0, 0.0), text_at(140.0, 30.0), text_at(180.0, 60.0)],
            50.0,
        );
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].elements.len(), 2);
        assert_eq!(buckets[1].anchor_x, 180.0);
    }

    #[test]
    fn test_buckets_keep_opening_order() {
        let buckets = bucket_columns(
            vec![text_at(700.0, 0.0), text_at(100.0, 0.0), text_at(710.0, 40.0)],
            50.0,
        );
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].anchor_x, 700.0);
        assert_eq!(buckets[1].anchor_x, 100.0);
        assert_eq!(buckets[0].elements.len(), 2);
    }

    #[test]
    fn test_members_keep_report_order() {
        let buckets = bucket_columns(
            vec![text_at(100.0, 90.0), text_at(105.0, 10.0), text_at(95.0, 50.0)],
            50.0,
        );
        let ys: Vec<f32> = buckets[0].elements.iter().map(|e| e.y).collect();
        assert_eq!(ys, vec![90.0, 10.0, 50.0]);
    }
}
