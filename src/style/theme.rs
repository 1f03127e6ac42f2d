//! Theme colors supplied by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A color as six uppercase hex digits, without a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse `RRGGBB`, `#RRGGBB`, `RGB` or `#RGB` in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use slide_oxide::style::HexColor;
    ///
    /// assert_eq!(HexColor::parse("#0c2238").unwrap().as_str(), "0C2238");
    /// assert_eq!(HexColor::parse("fa0").unwrap().as_str(), "FFAA00");
    /// assert!(HexColor::parse("blue").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => Some(Self(digits.to_ascii_uppercase())),
            3 => Some(Self(
                digits
                    .chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>()
                    .to_ascii_uppercase(),
            )),
            _ => None,
        }
    }

    /// Build from 8-bit channels.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("{:02X}{:02X}{:02X}", r, g, b))
    }

    /// The six hex digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("invalid hex color '{}'", value))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The seven named colors of a deck theme.
///
/// Deserializing never fails on a bad value: each missing or unparsable
/// field takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTheme")]
pub struct ThemeColors {
    /// Brand color
    pub primary: HexColor,
    /// Secondary brand color
    pub secondary: HexColor,
    /// Highlight color; headings render in it
    pub accent: HexColor,
    /// Slide background
    pub background: HexColor,
    /// Body text; fallback for unparsable measured colors
    pub text: HexColor,
    /// Heading text
    pub heading: HexColor,
    /// De-emphasized text
    pub muted: HexColor,
}

const DEFAULT_PRIMARY: &str = "2563EB";
const DEFAULT_SECONDARY: &str = "64748B";
const DEFAULT_ACCENT: &str = "F59E0B";
const DEFAULT_BACKGROUND: &str = "FFFFFF";
const DEFAULT_TEXT: &str = "1F2937";
const DEFAULT_HEADING: &str = "111827";
const DEFAULT_MUTED: &str = "9CA3AF";

impl Default for ThemeColors {
    fn default() -> Self {
        RawTheme::default().into()
    }
}

/// Theme as it arrives on the wire, before defaulting.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTheme {
    primary: Option<String>,
    secondary: Option<String>,
    accent: Option<String>,
    background: Option<String>,
    text: Option<String>,
    heading: Option<String>,
    muted: Option<String>,
}

fn resolve(name: &str, value: Option<String>, default: &str) -> HexColor {
    let parsed = value.as_deref().and_then(HexColor::parse);
    if parsed.is_none() {
        if let Some(raw) = &value {
            log::debug!("Theme color {} = '{}' is not a hex color, using {}", name, raw, default);
        }
    }
    parsed.unwrap_or_else(|| HexColor(default.to_string()))
}

impl From<RawTheme> for ThemeColors {
    fn from(raw: RawTheme) -> Self {
        Self {
            primary: resolve("primary", raw.primary, DEFAULT_PRIMARY),
            secondary: resolve("secondary", raw.secondary, DEFAULT_SECONDARY),
            accent: resolve("accent", raw.accent, DEFAULT_ACCENT),
            background: resolve("background", raw.background, DEFAULT_BACKGROUND),
            text: resolve("text", raw.text, DEFAULT_TEXT),
            heading: resolve("heading", raw.heading, DEFAULT_HEADING),
            muted: resolve("muted", raw.muted, DEFAULT_MUTED),
        }
    }
}
