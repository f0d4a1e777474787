//! Versioned scheme constants
//!
//! Palettes, glyph count, width range and the domain-separation tag are
//! pinned per scheme version. Changing any of them changes every
//! fingerprint ever produced, so a change means a new version.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return None;
        }
        let mut bytes = [0u8; 3];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(Self::rgb(bytes[0], bytes[1], bytes[2]))
    }

    /// Convert to CSS hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid color: {s}"))
    }
}

/// v1 shape palette
pub const SHAPES_V1: [char; 10] = ['□', '△', '○', '◇', '▦', '▣', '▢', '▧', '◍', '⬡'];

/// v1 color palette
pub const COLORS_V1: [Color; 10] = [
    Color::rgb(0x22, 0xc5, 0x5e),
    Color::rgb(0x60, 0xa5, 0xfa),
    Color::rgb(0xa7, 0x8b, 0xfa),
    Color::rgb(0xf4, 0x72, 0xb6),
    Color::rgb(0xfb, 0xbf, 0x24),
    Color::rgb(0x34, 0xd3, 0x99),
    Color::rgb(0xfb, 0x71, 0x85),
    Color::rgb(0xc0, 0x84, 0xfc),
    Color::rgb(0x38, 0xbd, 0xf8),
    Color::rgb(0x4a, 0xde, 0x80),
];

/// Palettes, glyph count and width range for the mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphConfig {
    shapes: &'static [char],
    colors: &'static [Color],
    count: usize,
    width_min: u32,
    width_max: u32,
}

impl GlyphConfig {
    pub const V1: Self = Self {
        shapes: &SHAPES_V1,
        colors: &COLORS_V1,
        count: 10,
        width_min: 18,
        width_max: 35,
    };

    /// Build a custom configuration.
    ///
    /// Every glyph index must land inside the 32-byte digest, so `count`
    /// is capped at 32.
    pub fn new(
        shapes: &'static [char],
        colors: &'static [Color],
        count: usize,
        width_min: u32,
        width_max: u32,
    ) -> Result<Self> {
        if shapes.is_empty() {
            return Err(Error::InvalidScheme("shape palette is empty".into()));
        }
        if colors.is_empty() {
            return Err(Error::InvalidScheme("color palette is empty".into()));
        }
        if count == 0 || count > crate::digest::DIGEST_LEN {
            return Err(Error::InvalidScheme(format!(
                "glyph count must be in 1..={}, got {count}",
                crate::digest::DIGEST_LEN
            )));
        }
        if width_min > width_max {
            return Err(Error::InvalidScheme(format!(
                "width range is inverted: {width_min} > {width_max}"
            )));
        }
        Ok(Self { shapes, colors, count, width_min, width_max })
    }

    pub fn shapes(&self) -> &'static [char] {
        self.shapes
    }

    pub fn colors(&self) -> &'static [Color] {
        self.colors
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn width_min(&self) -> u32 {
        self.width_min
    }

    pub fn width_max(&self) -> u32 {
        self.width_max
    }

    /// Number of distinct widths in the inclusive range.
    ///
    /// `u64` because `0..=u32::MAX` holds 2^32 values.
    pub fn width_span(&self) -> u64 {
        u64::from(self.width_max - self.width_min) + 1
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self::V1
    }
}

/// A complete, versioned encoding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    /// Domain-separation tag prepended to canonical input before digesting
    pub tag: &'static str,
    pub glyphs: GlyphConfig,
    /// Separator between the shape string and the checksum tail
    pub separator: char,
}

impl Scheme {
    pub const V1: Self = Self {
        tag: "cipher:v1:",
        glyphs: GlyphConfig::V1,
        separator: crate::fingerprint::CHECKSUM_SEPARATOR,
    };
}

impl Default for Scheme {
    fn default() -> Self {
        Self::V1
    }
}
