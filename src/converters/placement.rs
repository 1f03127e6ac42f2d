//! Placement commands for the document serializer.
//!
//! Each placed group becomes exactly one command. A lone text element becomes
//! a styled text box, a multi-element group becomes one multi-run block so
//! that its line breaks and bullets survive, and a non-text element becomes
//! an image box the serializer fills with the captured bitmap.

use serde::{Deserialize, Serialize};

use crate::layout::collision::PlacedRect;
use crate::layout::measurement::ElementMeasurement;
use crate::layout::paragraph::RenderGroup;
use crate::pipeline::config::PackerConfig;
use crate::style::{HexColor, StyleMapper, TextAlign, TextAttributes, ThemeColors, VerticalAnchor};

/// A single styled text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    /// Left edge (target units)
    pub x: f32,
    /// Top edge (target units)
    pub y: f32,
    /// Width (target units)
    pub w: f32,
    /// Height (target units)
    pub h: f32,
    /// Text content
    pub text: String,
    /// Style attributes
    pub style: TextAttributes,
}

/// One paragraph of a multi-run block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Bold weight
    pub bold: bool,
    /// Text color
    pub color: HexColor,
    /// Rendered with a bullet
    pub is_bullet_item: bool,
}

/// A text box holding several paragraphs, one per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunBlock {
    /// Left edge (target units)
    pub x: f32,
    /// Top edge (target units)
    pub y: f32,
    /// Width (target units)
    pub w: f32,
    /// Height (target units)
    pub h: f32,
    /// Paragraphs in reading order
    pub runs: Vec<TextRun>,
    /// Alignment of the block, taken from its first member
    pub align: TextAlign,
    /// Vertical anchor
    pub anchor: VerticalAnchor,
    /// Space after each paragraph (pt)
    pub paragraph_spacing: f32,
}

/// A box for a non-text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBox {
    /// Index the host reported for the element
    pub source_index: usize,
    /// Left edge (target units)
    pub x: f32,
    /// Top edge (target units)
    pub y: f32,
    /// Width (target units)
    pub w: f32,
    /// Height (target units)
    pub h: f32,
}

/// An instruction to draw one box in target space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlacementCommand {
    /// Single styled text box
    Text(TextBox),
    /// Multi-run text block
    Runs(RunBlock),
    /// Image or other non-text element
    Image(ImageBox),
}

impl PlacementCommand {
    /// Position and size as `(x, y, w, h)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            PlacementCommand::Text(b) => (b.x, b.y, b.w, b.h),
            PlacementCommand::Runs(b) => (b.x, b.y, b.w, b.h),
            PlacementCommand::Image(b) => (b.x, b.y, b.w, b.h),
        }
    }
}

/// Collapse whitespace runs left over from flattening inline markup.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns placed groups into placement commands.
#[derive(Debug, Clone)]
pub struct PlacementEmitter {
    mapper: StyleMapper,
    paragraph_spacing_pt: f32,
}

impl PlacementEmitter {
    /// Create an emitter from the packer configuration and a theme.
    pub fn new(config: &PackerConfig, theme: ThemeColors) -> Self {
        Self {
            mapper: StyleMapper::new(config, theme),
            paragraph_spacing_pt: config.paragraph_spacing_pt,
        }
    }

    /// Emit the command for one group at its resolved footprint.
    pub fn emit(&self, group: &RenderGroup, placed: &PlacedRect) -> PlacementCommand {
        let first = group.first();

        if group.is_non_text() {
            return PlacementCommand::Image(ImageBox {
                source_index: first.index,
                x: placed.x,
                y: placed.y,
                w: placed.w,
                h: placed.h,
            });
        }

        if group.len() == 1 {
            return PlacementCommand::Text(TextBox {
                x: placed.x,
                y: placed.y,
                w: placed.w,
                h: placed.h,
                text: normalize_text(&first.text),
                style: self.mapper.map(first),
            });
        }

        let lead = self.mapper.map(first);
        PlacementCommand::Runs(RunBlock {
            x: placed.x,
            y: placed.y,
            w: placed.w,
            h: placed.h,
            runs: group.elements().iter().map(|e| self.run(e)).collect(),
            align: lead.align,
            anchor: VerticalAnchor::Top,
            paragraph_spacing: self.paragraph_spacing_pt,
        })
    }

    /// Emit one command per group; `placed` must be parallel to `groups`.
    pub fn emit_all(&self, groups: &[RenderGroup], placed: &[PlacedRect]) -> Vec<PlacementCommand> {
        debug_assert_eq!(groups.len(), placed.len());
        groups.iter().zip(placed).map(|(g, p)| self.emit(g, p)).collect()
    }

    fn run(&self, element: &ElementMeasurement) -> TextRun {
        let attrs = self.mapper.map(element);
        TextRun {
            text: normalize_text(&element.text),
            font_size: attrs.font_size,
            bold: attrs.bold,
            color: attrs.color,
            is_bullet_item: attrs.bullet,
        }
    }
}

impl Default for PlacementEmitter {
    fn default() -> Self {
        Self::new(&PackerConfig::default(), ThemeColors::default())
    }
}
