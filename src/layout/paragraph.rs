//! Paragraph grouping within a column.
//!
//! The host reports flat measurements, so a paragraph that wrapped over
//! several lines, or a bullet list, arrives as a run of separate text
//! elements. Within one column bucket, consecutive text elements of similar
//! width are merged into one [`RenderGroup`]; a sharp width change signals a
//! structural break (full-width heading vs. half-column body) even when the
//! vertical gap is small.
//!
//! Break rules, applied while walking the bucket top to bottom:
//! - a non-text element closes the open group and stands alone
//! - a heading closes the open group and stands alone
//! - a width change of at least `width_delta_px` starts a new group
//! - a vertical gap of at least `paragraph_gap_px` starts a new group

use crate::layout::column_detector::ColumnBucket;
use crate::layout::measurement::ElementMeasurement;
use crate::pipeline::config::PackerConfig;
use crate::utils::safe_float_cmp;

/// Thresholds used by the paragraph grouper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingParams {
    /// Width change that breaks a group (px, exclusive)
    pub width_delta_px: f32,
    /// Vertical gap that breaks a group (px), if enabled
    pub paragraph_gap_px: Option<f32>,
    /// Floor for a group's measured height (px)
    pub min_group_height_px: f32,
}

impl GroupingParams {
    /// Extract grouping thresholds from a packer configuration.
    pub fn from_config(config: &PackerConfig) -> Self {
        Self {
            width_delta_px: config.width_delta_px,
            paragraph_gap_px: config.paragraph_gap_px,
            min_group_height_px: config.min_group_height_px,
        }
    }
}

impl Default for GroupingParams {
    fn default() -> Self {
        Self::from_config(&PackerConfig::default())
    }
}

/// A run of measurements forming one visual paragraph, or one standalone
/// non-text element.
///
/// Always holds at least one element. Built once and not modified afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    elements: Vec<ElementMeasurement>,
    x: f32,
    y: f32,
    w: f32,
    h_web: f32,
    column_anchor_x: f32,
}

impl RenderGroup {
    /// Build a group from ordered members.
    ///
    /// Returns `None` when `elements` is empty. The anchor is the first
    /// member's top-left; the width is the widest text member (or widest
    /// member when none carries text); the height spans from the first
    /// member's top to the last member's bottom, floored at `min_height`.
    pub fn new(elements: Vec<ElementMeasurement>, min_height: f32) -> Option<Self> {
        let first = elements.first()?;
        let last = elements.last()?;

        let x = first.x;
        let y = first.y;
        let h_web = (last.bottom() - first.y).max(min_height);

        let text_width = elements
            .iter()
            .filter(|e| e.kind.is_text())
            .map(|e| e.width)
            .fold(None, |acc: Option<f32>, w| Some(acc.map_or(w, |a| a.max(w))));
        let w = match text_width {
            Some(w) => w,
            None => elements.iter().map(|e| e.width).fold(0.0, f32::max),
        };

        Some(Self {
            elements,
            x,
            y,
            w,
            h_web,
            column_anchor_x: x,
        })
    }

    fn in_column(mut self, anchor_x: f32) -> Self {
        self.column_anchor_x = anchor_x;
        self
    }

    /// Members in vertical order.
    pub fn elements(&self) -> &[ElementMeasurement] {
        &self.elements
    }

    /// First member.
    pub fn first(&self) -> &ElementMeasurement {
        &self.elements[0]
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; groups are never empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Anchor x (px).
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Anchor y (px).
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Group width (px).
    pub fn w(&self) -> f32 {
        self.w
    }

    /// Estimated spanned height in source pixels.
    pub fn h_web(&self) -> f32 {
        self.h_web
    }

    /// Anchor of the column bucket this group came from (px).
    pub fn column_anchor_x(&self) -> f32 {
        self.column_anchor_x
    }

    /// True when the group is a single non-text element.
    pub fn is_non_text(&self) -> bool {
        !self.first().kind.is_text()
    }
}

/// Group the members of one column bucket into paragraphs.
///
/// # Examples
///
/// ```
/// use slide_oxide::layout::{bucket_columns, group_paragraphs, ElementKind, ElementMeasurement};
/// use slide_oxide::layout::paragraph::GroupingParams;
///
/// let lines = vec![
///     ElementMeasurement::new(ElementKind::GenericText, 100.0, 0.0, 400.0, 20.0).with_text("a"),
///     ElementMeasurement::new(ElementKind::GenericText, 100.0, 22.0, 410.0, 20.0).with_text("b"),
///     ElementMeasurement::new(ElementKind::Image, 100.0, 50.0, 400.0, 200.0),
/// ];
///
/// let buckets = bucket_columns(lines, 50.0);
/// let groups = group_paragraphs(&buckets[0], &GroupingParams::default());
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].len(), 2);
/// ```
pub fn group_paragraphs(bucket: &ColumnBucket, params: &GroupingParams) -> Vec<RenderGroup> {
    let mut sorted = bucket.elements.clone();
    sorted.sort_by(|a, b| safe_float_cmp(a.y, b.y));

    let mut groups = Vec::new();
    let mut open: Vec<ElementMeasurement> = Vec::new();

    for element in sorted {
        if !element.kind.is_text() {
            flush(&mut open, &mut groups, bucket.anchor_x, params);
            open.push(element);
            flush(&mut open, &mut groups, bucket.anchor_x, params);
            continue;
        }

        let extends = open.last().is_some_and(|prev| continues_paragraph(prev, &element, params));
        if !extends {
            flush(&mut open, &mut groups, bucket.anchor_x, params);
        }
        open.push(element);
    }
    flush(&mut open, &mut groups, bucket.anchor_x, params);

    groups
}

/// Group every bucket, in bucket order.
pub fn group_all(buckets: &[ColumnBucket], params: &GroupingParams) -> Vec<RenderGroup> {
    let groups: Vec<RenderGroup> =
        buckets.iter().flat_map(|b| group_paragraphs(b, params)).collect();
    log::debug!("Paragraph grouping: {} groups from {} buckets", groups.len(), buckets.len());
    groups
}

fn continues_paragraph(
    prev: &ElementMeasurement,
    next: &ElementMeasurement,
    params: &GroupingParams,
) -> bool {
    if prev.kind.is_heading() || next.kind.is_heading() {
        return false;
    }
    if (next.width - prev.width).abs() >= params.width_delta_px {
        return false;
    }
    match params.paragraph_gap_px {
        Some(max_gap) => next.y - prev.bottom() < max_gap,
        None => true,
    }
}

fn flush(
    open: &mut Vec<ElementMeasurement>,
    groups: &mut Vec<RenderGroup>,
    anchor_x: f32,
    params: &GroupingParams,
) {
    let members = std::mem::take(open);
    if let Some(group) = RenderGroup::new(members, params.min_group_height_px) {
        groups.push(group.in_column(anchor_x));
    }
}
