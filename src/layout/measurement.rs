//! Element measurements reported by the rendering host.
//!
//! A measurement is one visual element captured from a rendered slide: its
//! pixel geometry, flattened text and computed CSS style strings. The host
//! flattens the document tree, so nesting only survives as structural
//! measurements (columns, column groups, bullet lists) which are never placed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// The kind of a measured element.
///
/// Parsed case-insensitively from either the packer's own tags
/// (`heading-1`, `paragraph`, `generic-text`, `bullet-item`, `column`,
/// `column-group`, `bullets`, `image`) or the HTML tag names a browser host
/// reports (`h1`, `p`, `div`, `li`, `ul`, `img`, ...). Unknown tags become
/// [`ElementKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// Level 1 heading
    Heading1,
    /// Level 2 heading
    Heading2,
    /// Level 3 heading
    Heading3,
    /// Level 4 heading
    Heading4,
    /// Body paragraph
    Paragraph,
    /// Text without a more specific role (div/span lines)
    GenericText,
    /// One item of a bullet list
    BulletItem,
    /// Structural: a single column wrapper
    Column,
    /// Structural: a row of columns
    ColumnGroup,
    /// Structural: a bullet list wrapper
    Bullets,
    /// Raster or vector image
    Image,
    /// Anything else (shapes, charts, unknown tags)
    Other,
}

impl ElementKind {
    /// Canonical tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Heading1 => "heading-1",
            ElementKind::Heading2 => "heading-2",
            ElementKind::Heading3 => "heading-3",
            ElementKind::Heading4 => "heading-4",
            ElementKind::Paragraph => "paragraph",
            ElementKind::GenericText => "generic-text",
            ElementKind::BulletItem => "bullet-item",
            ElementKind::Column => "column",
            ElementKind::ColumnGroup => "column-group",
            ElementKind::Bullets => "bullets",
            ElementKind::Image => "image",
            ElementKind::Other => "other",
        }
    }

    /// Structural kinds only describe nesting and are never placed.
    pub fn is_structural(&self) -> bool {
        matches!(self, ElementKind::Column | ElementKind::ColumnGroup | ElementKind::Bullets)
    }

    /// Kinds that carry text and can join a paragraph group.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ElementKind::Heading1
                | ElementKind::Heading2
                | ElementKind::Heading3
                | ElementKind::Heading4
                | ElementKind::Paragraph
                | ElementKind::GenericText
                | ElementKind::BulletItem
        )
    }

    /// Heading level 1-4, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ElementKind::Heading1 => Some(1),
            ElementKind::Heading2 => Some(2),
            ElementKind::Heading3 => Some(3),
            ElementKind::Heading4 => Some(4),
            _ => None,
        }
    }

    /// True for heading levels 1-4.
    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// True for bullet list items.
    pub fn is_bullet_item(&self) -> bool {
        matches!(self, ElementKind::BulletItem)
    }
}

impl FromStr for ElementKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "heading-1" | "h1" => ElementKind::Heading1,
            "heading-2" | "h2" => ElementKind::Heading2,
            "heading-3" | "h3" => ElementKind::Heading3,
            "heading-4" | "h4" => ElementKind::Heading4,
            "paragraph" | "p" => ElementKind::Paragraph,
            "generic-text" | "div" | "span" => ElementKind::GenericText,
            "bullet-item" | "li" => ElementKind::BulletItem,
            "column" => ElementKind::Column,
            "column-group" => ElementKind::ColumnGroup,
            "bullets" | "ul" | "ol" => ElementKind::Bullets,
            "image" | "img" => ElementKind::Image,
            _ => ElementKind::Other,
        };
        Ok(kind)
    }
}

impl From<String> for ElementKind {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed CSS values as reported by the host, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStyles {
    /// Font size, e.g. `"32px"`
    #[serde(alias = "fontSizePx")]
    pub font_size: String,
    /// Font weight, e.g. `"700"` or `"bold"`
    pub font_weight: String,
    /// Text color, e.g. `"rgb(12, 34, 56)"`
    pub color: String,
    /// Text alignment, e.g. `"center"`
    pub text_align: String,
}

/// One measured visual element in source pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeasurement {
    /// Ordinal position reported by the host (informational only)
    #[serde(default)]
    pub index: usize,
    /// Element kind
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge in pixels
    pub x: f32,
    /// Top edge in pixels
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Flattened text content
    #[serde(default)]
    pub text: String,
    /// Computed style strings
    #[serde(default)]
    pub styles: ElementStyles,
}

impl ElementMeasurement {
    /// Create a measurement with empty text and styles.
    pub fn new(kind: ElementKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            index: 0,
            kind,
            x,
            y,
            width,
            height,
            text: String::new(),
            styles: ElementStyles::default(),
        }
    }

    /// Set the reported index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the computed styles.
    pub fn with_styles(mut self, styles: ElementStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Pixel-space bounding box.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bottom edge in pixels.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether this measurement has nothing placeable: non-finite or negative
    /// geometry, a text kind with blank text, or a non-text element with no
    /// area.
    ///
    /// Text with a zero width or height is kept; its group height is floored
    /// by the grouper.
    pub fn is_degenerate(&self) -> bool {
        let bbox = self.bbox();
        if !bbox.is_finite() || self.width < 0.0 || self.height < 0.0 {
            return true;
        }
        if self.kind.is_text() {
            self.text.trim().is_empty()
        } else {
            self.width == 0.0 || self.height == 0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_canonical_tags() {
        assert_eq!("heading-1".parse::<ElementKind>().unwrap(), ElementKind::Heading1);
        assert_eq!("generic-text".parse::<ElementKind>().unwrap(), ElementKind::GenericText);
        assert_eq!("column-group".parse::<ElementKind>().unwrap(), ElementKind::ColumnGroup);
    }

    #[test]
    fn test_kind_from_html_tags() {
        assert_eq!("H2".parse::<ElementKind>().unwrap(), ElementKind::Heading2);
        assert_eq!("p".parse::<ElementKind>().unwrap(), ElementKind::Paragraph);
        assert_eq!("LI".parse::<ElementKind>().unwrap(), ElementKind::BulletItem);
        assert_eq!("ul".parse::<ElementKind>().unwrap(), ElementKind::Bullets);
        assert_eq!("img".parse::<ElementKind>().unwrap(), ElementKind::Image);
        assert_eq!("svg".parse::<ElementKind>().unwrap(), ElementKind::Other);
    }

    #[test]
    fn test_kind_classification() {
        assert!(ElementKind::Column.is_structural());
        assert!(ElementKind::Bullets.is_structural());
        assert!(!ElementKind::BulletItem.is_structural());

        assert!(ElementKind::BulletItem.is_text());
        assert!(ElementKind::Heading4.is_text());
        assert!(!ElementKind::Image.is_text());
        assert!(!ElementKind::Other.is_text());

        assert_eq!(ElementKind::Heading3.heading_level(), Some(3));
        assert_eq!(ElementKind::Paragraph.heading_level(), None);
    }

    #[test]
    fn test_measurement_from_json() {
        let json = r#"{
            "index": 3,
            "type": "h1",
            "x": 100, "y": 50, "width": 800, "height": 90,
            "text": "Q1 Report",
            "styles": {
                "fontSizePx": "48px", "fontWeight": "700",
                "color": "rgb(1, 2, 3)", "textAlign": "center"
            }
        }"#;
        let m: ElementMeasurement = serde_json::from_str(json).unwrap();

        assert_eq!(m.index, 3);
        assert_eq!(m.kind, ElementKind::Heading1);
        assert_eq!(m.bbox(), Rect::new(100.0, 50.0, 800.0, 90.0));
        assert_eq!(m.styles.font_size, "48px");
        assert_eq!(m.styles.text_align, "center");
    }

    #[test]
    fn test_measurement_json_defaults() {
        let m: ElementMeasurement =
            serde_json::from_str(r#"{"type": "img", "x": 0, "y": 0, "width": 10, "height": 10}"#)
                .unwrap();
        assert_eq!(m.kind, ElementKind::Image);
        assert!(m.text.is_empty());
        assert_eq!(m.styles, ElementStyles::default());
    }

    #[test]
    fn test_kind_serializes_canonical_tag() {
        let m = ElementMeasurement::new(ElementKind::BulletItem, 0.0, 0.0, 1.0, 1.0);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains(r#""type":"bullet-item""#));
    }

    #[test]
    fn test_degenerate_measurements() {
        let empty_text = ElementMeasurement::new(ElementKind::Paragraph, 0.0, 0.0, 100.0, 20.0);
        assert!(empty_text.is_degenerate());

        let blank_text = empty_text.clone().with_text("   \n");
        assert!(blank_text.is_degenerate());

        let negative_width =
            ElementMeasurement::new(ElementKind::Paragraph, 0.0, 0.0, -5.0, 20.0).with_text("x");
        assert!(negative_width.is_degenerate());

        let empty_image = ElementMeasurement::new(ElementKind::Image, 0.0, 0.0, 10.0, 0.0);
        assert!(empty_image.is_degenerate());

        let nan = ElementMeasurement::new(ElementKind::Image, f32::NAN, 0.0, 10.0, 10.0);
        assert!(nan.is_degenerate());

        // Images carry no text and are still placeable.
        let image = ElementMeasurement::new(ElementKind::Image, 0.0, 0.0, 10.0, 10.0);
        assert!(!image.is_degenerate());

        let text = empty_text.with_text("Revenue");
        assert!(!text.is_degenerate());
    }

    #[test]
    fn test_zero_size_text_is_placeable() {
        let flat = ElementMeasurement::new(ElementKind::Paragraph, 100.0, 100.0, 400.0, 0.0)
            .with_text("Revenue grew 12%");
        assert!(!flat.is_degenerate());

        let narrow = ElementMeasurement::new(ElementKind::GenericText, 100.0, 100.0, 0.0, 20.0)
            .with_text("x");
        assert!(!narrow.is_degenerate());
    }
}
