//! Mapping of measured CSS styles to target text attributes.
//!
//! The host reports computed styles as raw CSS strings. Every value is parsed
//! leniently: anything unparsable falls back to a documented default instead
//! of failing the slide.

pub mod theme;

pub use theme::{HexColor, ThemeColors};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::layout::measurement::{ElementKind, ElementMeasurement};
use crate::pipeline::config::PackerConfig;

lazy_static! {
    /// Leading integer of a CSS length ("32px", "18.5px")
    static ref RE_LEADING_INT: Regex = Regex::new(r"^\s*(\d+)").unwrap();

    /// rgb()/rgba() with comma or space separated channels
    static ref RE_RGB: Regex = Regex::new(
        r"(?i)^\s*rgba?\(\s*(\d{1,3})[\s,]+(\d{1,3})[\s,]+(\d{1,3})\s*(?:[,/]\s*[\d.]+%?\s*)?\)\s*$"
    )
    .unwrap();
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned (default)
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
    /// Justified
    Justify,
}

impl TextAlign {
    /// Map a computed `text-align` value; unknown values are left aligned.
    pub fn from_css(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "center" => TextAlign::Center,
            "right" | "end" => TextAlign::Right,
            "justify" => TextAlign::Justify,
            _ => TextAlign::Left,
        }
    }
}

/// Vertical placement of text inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    /// Top of the box (body text)
    #[default]
    Top,
    /// Vertically centered (headings)
    Middle,
}

/// Target style attributes of one text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributes {
    /// Font size in points
    pub font_size: f32,
    /// Bold weight
    pub bold: bool,
    /// Text color
    pub color: HexColor,
    /// Horizontal alignment
    pub align: TextAlign,
    /// Vertical anchor
    pub anchor: VerticalAnchor,
    /// Whether text wraps inside the box
    pub wrap: bool,
    /// Rendered as a bulleted paragraph
    pub bullet: bool,
}

/// Parse the leading integer of a pixel font size.
///
/// Returns `None` when there is no leading integer or it is zero.
///
/// # Examples
///
/// ```
/// use slide_oxide::style::parse_font_size_px;
///
/// assert_eq!(parse_font_size_px("32px"), Some(32.0));
/// assert_eq!(parse_font_size_px("18.75px"), Some(18.0));
/// assert_eq!(parse_font_size_px("large"), None);
/// ```
pub fn parse_font_size_px(value: &str) -> Option<f32> {
    let caps = RE_LEADING_INT.captures(value)?;
    let px: u32 = caps.get(1)?.as_str().parse().ok()?;
    if px == 0 {
        None
    } else {
        Some(px as f32)
    }
}

/// Whether a computed `font-weight` is bold: `bold`, `bolder`, or a numeric
/// weight of at least 600.
pub fn is_bold_weight(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("bold") || value.eq_ignore_ascii_case("bolder") {
        return true;
    }
    value.parse::<f32>().is_ok_and(|w| w >= 600.0)
}

/// Parse a computed CSS color: `rgb(r, g, b)`, `rgba(r, g, b, a)` or hex.
///
/// # Examples
///
/// ```
/// use slide_oxide::style::parse_css_color;
///
/// assert_eq!(parse_css_color("rgb(12, 34, 56)").unwrap().as_str(), "0C2238");
/// assert!(parse_css_color("transparent").is_none());
/// ```
pub fn parse_css_color(value: &str) -> Option<HexColor> {
    if let Some(caps) = RE_RGB.captures(value) {
        let r: u8 = caps.get(1)?.as_str().parse().ok()?;
        let g: u8 = caps.get(2)?.as_str().parse().ok()?;
        let b: u8 = caps.get(3)?.as_str().parse().ok()?;
        return Some(HexColor::from_rgb(r, g, b));
    }
    if value.trim_start().starts_with('#') {
        return HexColor::parse(value);
    }
    None
}

/// Maps measured elements to target text attributes.
#[derive(Debug, Clone)]
pub struct StyleMapper {
    font_scale: f32,
    default_font_size_px: f32,
    theme: ThemeColors,
}

impl StyleMapper {
    /// Create a mapper from the packer configuration and a theme.
    pub fn new(config: &PackerConfig, theme: ThemeColors) -> Self {
        Self {
            font_scale: config.font_scale,
            default_font_size_px: config.default_font_size_px,
            theme,
        }
    }

    /// The theme in use.
    pub fn theme(&self) -> &ThemeColors {
        &self.theme
    }

    /// Font size in points for a computed pixel size string.
    pub fn font_size_points(&self, value: &str) -> f32 {
        let px = parse_font_size_px(value).unwrap_or(self.default_font_size_px);
        px * self.font_scale
    }

    /// Text color: accent for headings, otherwise the measured color with the
    /// theme text color as fallback.
    pub fn color(&self, element: &ElementMeasurement) -> HexColor {
        if element.kind.is_heading() {
            return self.theme.accent.clone();
        }
        parse_css_color(&element.styles.color).unwrap_or_else(|| {
            log::trace!(
                "Unparsable color '{}' on element {}, using theme text color",
                element.styles.color,
                element.index
            );
            self.theme.text.clone()
        })
    }

    /// Full attribute set for one element.
    pub fn map(&self, element: &ElementMeasurement) -> TextAttributes {
        let heading = element.kind.is_heading();
        TextAttributes {
            font_size: self.font_size_points(&element.styles.font_size),
            bold: heading || is_bold_weight(&element.styles.font_weight),
            color: self.color(element),
            align: TextAlign::from_css(&element.styles.text_align),
            anchor: if heading {
                VerticalAnchor::Middle
            } else {
                VerticalAnchor::Top
            },
            wrap: !heading,
            bullet: element.kind == ElementKind::BulletItem,
        }
    }
}

impl Default for StyleMapper {
    fn default() -> Self {
        Self::new(&PackerConfig::default(), ThemeColors::default())
    }
}
