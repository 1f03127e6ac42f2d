//! Unified configuration for the slide packer.
//!
//! Every heuristic constant of the pipeline lives here. The defaults are
//! calibrated for a browser measuring surface exported to PowerPoint; other
//! target renderers have different font metrics and get their own presets
//! through [`TargetRenderer`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reading order strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingOrderStrategyType {
    /// Top-to-bottom rows, left-to-right within a row (default)
    #[default]
    RowBand,
    /// Column by column, top-to-bottom within each column
    ColumnMajor,
}

/// Reading order configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingOrderConfig {
    /// Strategy used by the global sequencer
    pub strategy: ReadingOrderStrategyType,
}

/// Target renderer profile.
///
/// The measuring surface and the renderer that finally opens the document
/// disagree on font metrics; each profile carries the font scale and
/// height safety multiplier tuned for one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRenderer {
    /// Microsoft PowerPoint (the calibrated defaults)
    PowerPoint,
    /// Apple Keynote
    Keynote,
    /// Google Slides
    GoogleSlides,
}

impl TargetRenderer {
    /// Create a packer configuration tuned for this renderer.
    pub fn create_config(&self) -> PackerConfig {
        match self {
            Self::PowerPoint => PackerConfig::default(),
            Self::Keynote => PackerConfig {
                font_scale: 0.75,
                height_multiplier: 1.3,
                ..PackerConfig::default()
            },
            Self::GoogleSlides => PackerConfig {
                font_scale: 0.6,
                height_multiplier: 1.5,
                ..PackerConfig::default()
            },
        }
    }
}

/// Configuration for the whole packing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackerConfig {
    /// Two elements share a column when their left edges differ by less than this (px)
    pub column_threshold_px: f32,

    /// A text element continues a group when its width differs from the
    /// previous member by less than this (px)
    pub width_delta_px: f32,

    /// A vertical gap of at least this much between consecutive text elements
    /// starts a new group (px). `None` disables the rule.
    pub paragraph_gap_px: Option<f32>,

    /// Groups whose tops differ by less than this are on the same reading row (px)
    pub row_tolerance_px: f32,

    /// Floor for a group's measured height (px)
    pub min_group_height_px: f32,

    /// Safety factor applied to converted group heights
    pub height_multiplier: f32,

    /// Maximum number of downward pushes per group
    pub max_push_attempts: u32,

    /// Clearance left below a colliding rectangle when pushing (target units)
    pub push_gap_units: f32,

    /// Points per measured CSS pixel of font size
    pub font_scale: f32,

    /// Font size assumed when the measured value cannot be parsed (px)
    pub default_font_size_px: f32,

    /// Space after each paragraph of a multi-run block (pt)
    pub paragraph_spacing_pt: f32,

    /// Drop measurements with empty geometry or blank text before grouping
    pub drop_degenerate: bool,

    /// Reading order strategy
    pub reading_order: ReadingOrderConfig,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            column_threshold_px: 50.0,
            width_delta_px: 100.0,
            paragraph_gap_px: Some(24.0),
            row_tolerance_px: 10.0,
            min_group_height_px: 20.0,
            height_multiplier: 1.6,
            max_push_attempts: 10,
            push_gap_units: 0.1,
            font_scale: 0.55,
            default_font_size_px: 24.0,
            paragraph_spacing_pt: 6.0,
            drop_degenerate: true,
            reading_order: ReadingOrderConfig::default(),
        }
    }
}

impl PackerConfig {
    /// Create a configuration with the calibrated defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column proximity threshold.
    pub fn with_column_threshold(mut self, px: f32) -> Self {
        self.column_threshold_px = px;
        self
    }

    /// Set the width-change threshold for paragraph grouping.
    pub fn with_width_delta(mut self, px: f32) -> Self {
        self.width_delta_px = px;
        self
    }

    /// Set (or disable with `None`) the paragraph gap break.
    pub fn with_paragraph_gap(mut self, px: Option<f32>) -> Self {
        self.paragraph_gap_px = px;
        self
    }

    /// Set the height safety multiplier.
    pub fn with_height_multiplier(mut self, multiplier: f32) -> Self {
        self.height_multiplier = multiplier;
        self
    }

    /// Set the push attempt bound.
    pub fn with_max_push_attempts(mut self, attempts: u32) -> Self {
        self.max_push_attempts = attempts;
        self
    }

    /// Set the font scale (points per pixel).
    pub fn with_font_scale(mut self, scale: f32) -> Self {
        self.font_scale = scale;
        self
    }

    /// Select the reading order strategy.
    pub fn with_reading_order(mut self, strategy: ReadingOrderStrategyType) -> Self {
        self.reading_order.strategy = strategy;
        self
    }

    /// Check that every threshold and factor is usable.
    pub fn validate(&self) -> Result<()> {
        positive("columnThresholdPx", self.column_threshold_px)?;
        positive("widthDeltaPx", self.width_delta_px)?;
        if let Some(gap) = self.paragraph_gap_px {
            positive("paragraphGapPx", gap)?;
        }
        non_negative("rowTolerancePx", self.row_tolerance_px)?;
        non_negative("minGroupHeightPx", self.min_group_height_px)?;
        positive("heightMultiplier", self.height_multiplier)?;
        non_negative("pushGapUnits", self.push_gap_units)?;
        positive("fontScale", self.font_scale)?;
        positive("defaultFontSizePx", self.default_font_size_px)?;
        non_negative("paragraphSpacingPt", self.paragraph_spacing_pt)?;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be positive, got {}", name, value)))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must not be negative, got {}", name, value)))
    }
}
