//! Geometric primitives and coordinate spaces.
//!
//! The packer reconciles two coordinate spaces: the *source* space in which a
//! slide was rendered and measured (pixels, origin top-left) and the *target*
//! canvas of the output document (physical units such as inches, origin
//! top-left). Both share the same orientation, so conversion is a pair of
//! independent axis scales.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use slide_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if this rectangle overlaps another.
    ///
    /// Both axes use strict comparisons, so rectangles that merely share an
    /// edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use slide_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// let touching = Rect::new(0.0, 100.0, 100.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&touching));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Same rectangle moved to a new top edge.
    pub fn with_y(&self, y: f32) -> Rect {
        Rect { y, ..*self }
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Size of the output document canvas in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSize {
    /// Canvas width in target units
    pub width_units: f32,
    /// Canvas height in target units
    pub height_units: f32,
}

impl CanvasSize {
    /// 16:9 presentation canvas, 10 × 5.625 inches.
    pub const WIDESCREEN: CanvasSize = CanvasSize {
        width_units: 10.0,
        height_units: 5.625,
    };

    /// 4:3 presentation canvas, 10 × 7.5 inches.
    pub const STANDARD: CanvasSize = CanvasSize {
        width_units: 10.0,
        height_units: 7.5,
    };

    /// Create a canvas size.
    pub fn new(width_units: f32, height_units: f32) -> Self {
        Self {
            width_units,
            height_units,
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// Size of the surface the slide was rendered and measured on, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSize {
    /// Render width in pixels
    pub width_px: f32,
    /// Render height in pixels
    pub height_px: f32,
}

impl SourceSize {
    /// 1280 × 720 render surface.
    pub const HD: SourceSize = SourceSize {
        width_px: 1280.0,
        height_px: 720.0,
    };

    /// 1920 × 1080 render surface.
    pub const FULL_HD: SourceSize = SourceSize {
        width_px: 1920.0,
        height_px: 1080.0,
    };

    /// Create a source size.
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

impl Default for SourceSize {
    fn default() -> Self {
        Self::HD
    }
}

/// Independent horizontal and vertical scale factors from source pixels to
/// target units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    /// Target units per source pixel, horizontally
    pub sx: f32,
    /// Target units per source pixel, vertically
    pub sy: f32,
}

impl ScaleFactors {
    /// Convert a pixel-space rectangle to target units.
    ///
    /// # Examples
    ///
    /// ```
    /// use slide_oxide::geometry::{CanvasSize, CoordinateSpaces, Rect, SourceSize};
    ///
    /// let spaces = CoordinateSpaces::new(CanvasSize::WIDESCREEN, SourceSize::HD).unwrap();
    /// let target = spaces.scale().to_target(&Rect::new(640.0, 360.0, 128.0, 72.0));
    /// assert_eq!(target, Rect::new(5.0, 2.8125, 1.0, 0.5625));
    /// ```
    pub fn to_target(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x * self.sx,
            rect.y * self.sy,
            rect.width * self.sx,
            rect.height * self.sy,
        )
    }

    /// Convert a target-space rectangle back to source pixels.
    pub fn to_source(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x / self.sx,
            rect.y / self.sy,
            rect.width / self.sx,
            rect.height / self.sy,
        )
    }

    /// Convert a horizontal pixel length to target units.
    pub fn x_units(&self, px: f32) -> f32 {
        px * self.sx
    }

    /// Convert a vertical pixel length to target units.
    pub fn y_units(&self, px: f32) -> f32 {
        px * self.sy
    }
}

/// A validated pair of source and target coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpaces {
    canvas: CanvasSize,
    source: SourceSize,
}

impl CoordinateSpaces {
    /// Pair a target canvas with a source surface.
    ///
    /// Every dimension must be finite and strictly positive.
    pub fn new(canvas: CanvasSize, source: SourceSize) -> Result<Self> {
        check_dimension("canvas width", canvas.width_units)?;
        check_dimension("canvas height", canvas.height_units)?;
        check_dimension("source width", source.width_px)?;
        check_dimension("source height", source.height_px)?;
        Ok(Self { canvas, source })
    }

    /// The target canvas.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// The source render surface.
    pub fn source(&self) -> SourceSize {
        self.source
    }

    /// Scale factors from source pixels to target units.
    pub fn scale(&self) -> ScaleFactors {
        ScaleFactors {
            sx: self.canvas.width_units / self.source.width_px,
            sy: self.canvas.height_units / self.source.height_px,
        }
    }
}

impl Default for CoordinateSpaces {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            source: SourceSize::default(),
        }
    }
}

fn check_dimension(what: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidCoordinateSpace { what, value })
    }
}
