//! Slide packing pipeline.
//!
//! ```text
//! ElementMeasurement[] (source pixels)
//!     ↓
//! [filter] (structural and degenerate elements dropped)
//!     ↓
//! [bucket_columns] → ColumnBucket[]
//!     ↓
//! [group_paragraphs] → RenderGroup[] per bucket
//!     ↓
//! [ReadingOrderStrategy] (pluggable global sequencing)
//!     ↓
//! [PlacedSet] (collision resolution in target units)
//!     ↓
//! [PlacementEmitter] → PlacementCommand[]
//! ```
//!
//! All tunable thresholds live in [`PackerConfig`]. Packing one slide is pure
//! and synchronous, and never fails once the coordinate spaces are valid.

pub mod config;
pub mod reading_order;

// Re-export main types
pub use config::{PackerConfig, ReadingOrderConfig, ReadingOrderStrategyType, TargetRenderer};
pub use reading_order::{ColumnMajorStrategy, ReadingOrderStrategy, RowBandStrategy};

use serde::{Deserialize, Serialize};

use crate::converters::{PlacementCommand, PlacementEmitter};
use crate::error::Result;
use crate::geometry::{CanvasSize, CoordinateSpaces, SourceSize};
use crate::layout::{
    bucket_columns, group_all, resolve_collisions, CollisionParams, ElementMeasurement,
    GroupingParams, PlacedRect,
};
use crate::style::ThemeColors;
use reading_order::create_strategy;

/// Counters describing what happened to one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackReport {
    /// Measurements received
    pub measurements_in: usize,
    /// Structural or degenerate measurements filtered out
    pub measurements_dropped: usize,
    /// Render groups placed
    pub groups: usize,
    /// Groups still overlapping after the push bound was reached
    pub unresolved_collisions: usize,
    /// Groups whose footprint extends below the canvas
    pub overflowing: usize,
}

/// The packed result for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedSlide {
    /// Placement commands in reading order
    pub commands: Vec<PlacementCommand>,
    /// Resolved footprints, parallel to `commands`
    pub placed: Vec<PlacedRect>,
    /// Summary counters
    pub report: PackReport,
}

impl PackedSlide {
    /// A slide with nothing to place.
    pub fn empty(measurements_in: usize) -> Self {
        Self {
            commands: Vec::new(),
            placed: Vec::new(),
            report: PackReport {
                measurements_in,
                measurements_dropped: measurements_in,
                ..PackReport::default()
            },
        }
    }
}

/// One slide as supplied by the measuring host.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInput {
    /// Measured elements in document order
    #[serde(default)]
    pub measurements: Vec<ElementMeasurement>,
    /// Theme override for this slide
    #[serde(default)]
    pub theme: Option<ThemeColors>,
    /// Canvas override for this slide
    #[serde(default)]
    pub canvas_size: Option<CanvasSize>,
    /// Source viewport override for this slide
    #[serde(default)]
    pub source_size: Option<SourceSize>,
}

/// A deck of slides sharing defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInput {
    /// Slides in deck order
    #[serde(default)]
    pub slides: Vec<SlideInput>,
    /// Theme shared by all slides
    #[serde(default)]
    pub theme: Option<ThemeColors>,
    /// Canvas shared by all slides
    #[serde(default)]
    pub canvas_size: Option<CanvasSize>,
    /// Source viewport shared by all slides
    #[serde(default)]
    pub source_size: Option<SourceSize>,
}

/// The slide packer: orchestrates bucketing, grouping, ordering, collision
/// resolution and emission.
///
/// # Examples
///
/// ```
/// use slide_oxide::geometry::CoordinateSpaces;
/// use slide_oxide::layout::{ElementKind, ElementMeasurement};
/// use slide_oxide::pipeline::SlidePacker;
/// use slide_oxide::style::ThemeColors;
///
/// let heading = ElementMeasurement::new(ElementKind::Heading1, 100.0, 50.0, 800.0, 90.0)
///     .with_text("Q1 Report");
///
/// let packer = SlidePacker::new();
/// let slide = packer.pack(&[heading], &ThemeColors::default(), &CoordinateSpaces::default());
/// assert_eq!(slide.commands.len(), 1);
/// ```
pub struct SlidePacker {
    config: PackerConfig,
    reading_order_strategy: Box<dyn ReadingOrderStrategy>,
}

impl SlidePacker {
    /// Create a packer with default configuration.
    pub fn new() -> Self {
        Self::with_config(PackerConfig::default())
    }

    /// Create a packer with custom configuration.
    ///
    /// The configuration is used as given; run [`PackerConfig::validate`]
    /// first, or use [`SlidePacker::try_with_config`], when it comes from
    /// outside the program.
    pub fn with_config(config: PackerConfig) -> Self {
        let strategy = create_strategy(&config);
        Self {
            config,
            reading_order_strategy: strategy,
        }
    }

    /// Create a packer after validating the configuration.
    pub fn try_with_config(config: PackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Pack one slide.
    pub fn pack(
        &self,
        measurements: &[ElementMeasurement],
        theme: &ThemeColors,
        spaces: &CoordinateSpaces,
    ) -> PackedSlide {
        let measurements_in = measurements.len();
        let elements: Vec<ElementMeasurement> = measurements
            .iter()
            .filter(|m| self.keep(m))
            .cloned()
            .collect();
        let dropped = measurements_in - elements.len();
        log::debug!(
            "Packing slide: {} measurements, {} dropped",
            measurements_in,
            dropped
        );

        if elements.is_empty() {
            return PackedSlide::empty(measurements_in);
        }

        let buckets = bucket_columns(elements, self.config.column_threshold_px);
        let groups = group_all(&buckets, &GroupingParams::from_config(&self.config));
        let groups = self.reading_order_strategy.order(groups);
        log::debug!(
            "Sequenced {} groups with {}",
            groups.len(),
            self.reading_order_strategy.name()
        );

        let scale = spaces.scale();
        let collision_params = CollisionParams::from_config(&self.config);
        let placed = resolve_collisions(&groups, &scale, &collision_params);

        let emitter = PlacementEmitter::new(&self.config, theme.clone());
        let commands = emitter.emit_all(&groups, &placed);

        let canvas_height = spaces.canvas().height_units;
        let overflowing = placed.iter().filter(|p| p.bottom() > canvas_height).count();
        if overflowing > 0 {
            log::warn!(
                "{} of {} groups extend below the canvas ({} units)",
                overflowing,
                placed.len(),
                canvas_height
            );
        }

        let report = PackReport {
            measurements_in,
            measurements_dropped: dropped,
            groups: groups.len(),
            unresolved_collisions: placed.iter().filter(|p| !p.resolved).count(),
            overflowing,
        };

        PackedSlide {
            commands,
            placed,
            report,
        }
    }

    /// Pack a slide described by its JSON input, using `WIDESCREEN` and `HD`
    /// for missing sizes.
    pub fn pack_slide(&self, slide: &SlideInput) -> Result<PackedSlide> {
        let spaces = CoordinateSpaces::new(
            slide.canvas_size.unwrap_or_default(),
            slide.source_size.unwrap_or_default(),
        )?;
        let theme = slide.theme.clone().unwrap_or_default();
        Ok(self.pack(&slide.measurements, &theme, &spaces))
    }

    /// Pack every slide of a deck in order. Slide-level theme and sizes
    /// override the deck-level ones.
    pub fn pack_deck(&self, deck: &DeckInput) -> Result<Vec<PackedSlide>> {
        log::debug!("Packing deck of {} slides", deck.slides.len());
        deck.slides
            .iter()
            .map(|slide| {
                let spaces = CoordinateSpaces::new(
                    slide.canvas_size.or(deck.canvas_size).unwrap_or_default(),
                    slide.source_size.or(deck.source_size).unwrap_or_default(),
                )?;
                let theme = slide
                    .theme
                    .as_ref()
                    .or(deck.theme.as_ref())
                    .cloned()
                    .unwrap_or_default();
                Ok(self.pack(&slide.measurements, &theme, &spaces))
            })
            .collect()
    }

    fn keep(&self, m: &ElementMeasurement) -> bool {
        if m.kind.is_structural() {
            return false;
        }
        if self.config.drop_degenerate && m.is_degenerate() {
            log::debug!("Dropping degenerate {} element {}", m.kind, m.index);
            return false;
        }
        true
    }
}

impl Default for SlidePacker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ElementKind;

    fn para(y: f32, text: &str) -> ElementMeasurement {
        ElementMeasurement::new(ElementKind::Paragraph, 100.0, y, 600.0, 30.0).with_text(text)
    }

    fn is_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_packer_is_send_sync() {
        is_send_sync::<SlidePacker>();
    }

    #[test]
    fn test_empty_input() {
        let slide =
            SlidePacker::new().pack(&[], &ThemeColors::default(), &CoordinateSpaces::default());
        assert!(slide.commands.is_empty());
        assert!(slide.placed.is_empty());
        assert_eq!(slide.report, PackReport::default());
    }

    #[test]
    fn test_structural_and_degenerate_dropped() {
        let input = vec![
            ElementMeasurement::new(ElementKind::ColumnGroup, 0.0, 0.0, 1280.0, 720.0),
            ElementMeasurement::new(ElementKind::Column, 0.0, 0.0, 640.0, 720.0),
            ElementMeasurement::new(ElementKind::Paragraph, 100.0, 100.0, -1.0, 30.0)
                .with_text("negative"),
            ElementMeasurement::new(ElementKind::Paragraph, 100.0, 100.0, 300.0, 30.0)
                .with_text("   "),
            para(200.0, "kept"),
        ];
        let slide =
            SlidePacker::new().pack(&input, &ThemeColors::default(), &CoordinateSpaces::default());

        assert_eq!(slide.commands.len(), 1);
        assert_eq!(slide.report.measurements_in, 5);
        assert_eq!(slide.report.measurements_dropped, 4);
        assert_eq!(slide.report.groups, 1);
    }

    #[test]
    fn test_zero_height_text_is_placed() {
        let flat = ElementMeasurement::new(ElementKind::Paragraph, 100.0, 100.0, 400.0, 0.0)
            .with_text("Revenue grew 12%");
        let slide =
            SlidePacker::new().pack(&[flat], &ThemeColors::default(), &CoordinateSpaces::default());

        assert_eq!(slide.commands.len(), 1);
        assert_eq!(slide.report.measurements_dropped, 0);
        // Height floored at 20px before conversion and inflation.
        assert!((slide.placed[0].h - 20.0 * 0.0078125 * 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_zero_height_line_stays_in_run_block() {
        let input = vec![
            para(100.0, "first"),
            ElementMeasurement::new(ElementKind::Paragraph, 100.0, 132.0, 600.0, 0.0)
                .with_text("flat"),
            para(140.0, "last"),
        ];
        let slide =
            SlidePacker::new().pack(&input, &ThemeColors::default(), &CoordinateSpaces::default());

        assert_eq!(slide.commands.len(), 1);
        match &slide.commands[0] {
            PlacementCommand::Runs(block) => {
                let texts: Vec<&str> = block.runs.iter().map(|r| r.text.as_str()).collect();
                assert_eq!(texts, vec!["first", "flat", "last"]);
            },
            other => panic!("expected run block, got {:?}", other),
        }
    }

    #[test]
    fn test_try_with_config_rejects_invalid() {
        let bad = PackerConfig::new().with_height_multiplier(-1.0);
        assert!(matches!(
            SlidePacker::try_with_config(bad),
            Err(crate::Error::InvalidConfig(_))
        ));

        let nan = PackerConfig::new().with_column_threshold(f32::NAN);
        assert!(SlidePacker::try_with_config(nan).is_err());

        assert!(SlidePacker::try_with_config(TargetRenderer::Keynote.create_config()).is_ok());
    }

    #[test]
    fn test_only_structural_is_empty() {
        let input = vec![ElementMeasurement::new(ElementKind::Bullets, 0.0, 0.0, 100.0, 100.0)];
        let slide =
            SlidePacker::new().pack(&input, &ThemeColors::default(), &CoordinateSpaces::default());
        assert!(slide.commands.is_empty());
        assert_eq!(slide.report.measurements_dropped, 1);
    }

    #[test]
    fn test_overflow_is_reported_not_moved() {
        let input = vec![para(700.0, "near the bottom")];
        let slide =
            SlidePacker::new().pack(&input, &ThemeColors::default(), &CoordinateSpaces::default());

        assert_eq!(slide.report.overflowing, 1);
        assert!((slide.placed[0].y - 700.0 * 0.0078125).abs() < 1e-5);
    }

    #[test]
    fn test_pack_deck_slide_overrides() {
        let deck: DeckInput = serde_json::from_str(
            r#"{
                "canvasSize": {"widthUnits": 10.0, "heightUnits": 7.5},
                "slides": [
                    {"measurements": [
                        {"type": "paragraph", "x": 0, "y": 0, "width": 100, "height": 20,
                         "text": "a"}
                    ]},
                    {"measurements": [], "canvasSize": {"widthUnits": 20.0, "heightUnits": 11.25}}
                ]
            }"#,
        )
        .unwrap();

        let slides = SlidePacker::new().pack_deck(&deck).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].commands.len(), 1);
        // 10 / 1280 horizontally, 7.5 / 720 vertically.
        assert!((slides[0].placed[0].w - 100.0 * 10.0 / 1280.0).abs() < 1e-5);
        assert!(slides[1].commands.is_empty());
    }

    #[test]
    fn test_pack_deck_rejects_bad_canvas() {
        let deck: DeckInput = serde_json::from_str(
            r#"{"slides": [{"canvasSize": {"widthUnits": 0.0, "heightUnits": 5.0}}]}"#,
        )
        .unwrap();
        assert!(SlidePacker::new().pack_deck(&deck).is_err());
    }

    #[test]
    fn test_pack_slide_defaults() {
        let slide = SlideInput {
            measurements: vec![para(0.0, "one")],
            ..SlideInput::default()
        };
        let packed = SlidePacker::new().pack_slide(&slide).unwrap();
        assert_eq!(packed.commands.len(), 1);
        assert_eq!(packed.report.unresolved_collisions, 0);
    }
}
