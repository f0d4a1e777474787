//! Glyph Mapper - digest bytes → ordered glyph descriptors
//!
//! For glyph `i`:
//! - shape: byte `i`
//! - color: byte `i + 11`
//! - width: byte `i + 5`
//!
//! All indices wrap modulo 32. The offsets keep one byte from deciding
//! shape, color and width of the same glyph. They are part of the scheme
//! version and are not configurable.

use crate::digest::Digest;
use crate::scheme::{Color, GlyphConfig};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Digest offset for the color byte
pub const COLOR_OFFSET: usize = 11;

/// Digest offset for the width byte
pub const WIDTH_OFFSET: usize = 5;

/// One visual unit in the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphDescriptor {
    pub shape: char,
    pub color: Color,
    /// Horizontal advance in pixels
    pub width: u32,
}

/// Glyphs in left-to-right rendering order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphSequence(Vec<GlyphDescriptor>);

impl GlyphSequence {
    /// The sequence produced for empty canonical input
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Shape symbols concatenated in order
    pub fn shapes(&self) -> String {
        self.0.iter().map(|g| g.shape).collect()
    }

    /// Sum of glyph widths
    pub fn total_width(&self) -> u32 {
        self.0.iter().map(|g| g.width).sum()
    }

    pub fn into_inner(self) -> Vec<GlyphDescriptor> {
        self.0
    }
}

impl Deref for GlyphSequence {
    type Target = [GlyphDescriptor];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a GlyphSequence {
    type Item = &'a GlyphDescriptor;
    type IntoIter = std::slice::Iter<'a, GlyphDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Derive `config.count()` glyphs from a digest. Pure and total.
pub fn map_to_glyphs(digest: &Digest, config: &GlyphConfig) -> GlyphSequence {
    let shapes = config.shapes();
    let colors = config.colors();
    let span = config.width_span();

    let glyphs = (0..config.count())
        .map(|i| GlyphDescriptor {
            shape: shapes[usize::from(digest.wrapped(i)) % shapes.len()],
            color: colors[usize::from(digest.wrapped(i + COLOR_OFFSET)) % colors.len()],
            // remainder < span, so the sum stays within width_max
            width: config.width_min() + (u64::from(digest.wrapped(i + WIDTH_OFFSET)) % span) as u32,
        })
        .collect();

    GlyphSequence(glyphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::COLORS_V1;

    fn coffee_primary() -> Digest {
        Digest::from_hex("881cee02f96e2c2b8f3d96b270cc7c694fa52d7d09c39458c65f7825182aa40d").unwrap()
    }

    #[test]
    fn test_known_mapping() {
        let glyphs = map_to_glyphs(&coffee_primary(), &GlyphConfig::V1);

        assert_eq!(glyphs.len(), 10);
        assert_eq!(glyphs.shapes(), "▢◍◍○⬡□▦◇◇△");
        assert_eq!(glyphs[0].color.to_hex(), "#38bdf8");
        assert_eq!(glyphs[0].width, 20);
        assert_eq!(glyphs[3].width, 35);
        assert_eq!(glyphs[9].color.to_hex(), "#4ade80");
        assert_eq!(glyphs[9].width, 34);
    }

    #[test]
    fn test_uses_separate_bytes() {
        // Only byte 0 set: shape 0 changes, color and width of glyph 0 do not
        let mut bytes = [0u8; 32];
        bytes[0] = 3;
        let glyphs = map_to_glyphs(&Digest::from_bytes(bytes), &GlyphConfig::V1);

        assert_eq!(glyphs[0].shape, '◇');
        assert_eq!(glyphs[0].color, COLORS_V1[0]);
        assert_eq!(glyphs[0].width, 18);
    }

    #[test]
    fn test_indices_wrap() {
        static SHAPES: [char; 2] = ['x', 'y'];
        static COLORS: [Color; 2] = [Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)];
        let config = GlyphConfig::new(&SHAPES, &COLORS, 32, 1, 2).unwrap();

        let mut bytes = [0u8; 32];
        // glyph 31 reads color from byte (31 + 11) % 32 = 10, width from (31 + 5) % 32 = 4
        bytes[10] = 1;
        bytes[4] = 1;
        let glyphs = map_to_glyphs(&Digest::from_bytes(bytes), &config);

        assert_eq!(glyphs.len(), 32);
        assert_eq!(glyphs[31].color, COLORS[1]);
        assert_eq!(glyphs[31].width, 2);
    }

    #[test]
    fn test_ranges_hold_for_every_byte_value() {
        let config = GlyphConfig::V1;
        for value in 0..=255u8 {
            let glyphs = map_to_glyphs(&Digest::from_bytes([value; 32]), &config);
            for glyph in &glyphs {
                assert!(config.shapes().contains(&glyph.shape));
                assert!(config.colors().contains(&glyph.color));
                assert!((config.width_min()..=config.width_max()).contains(&glyph.width));
            }
        }
    }

    #[test]
    fn test_single_width_range() {
        static SHAPES: [char; 1] = ['x'];
        static COLORS: [Color; 1] = [Color::rgb(1, 2, 3)];
        let config = GlyphConfig::new(&SHAPES, &COLORS, 3, 7, 7).unwrap();

        let glyphs = map_to_glyphs(&Digest::from_bytes([0xff; 32]), &config);
        assert!(glyphs.iter().all(|g| g.width == 7));
    }

    #[test]
    fn test_full_u32_width_range() {
        static SHAPES: [char; 1] = ['x'];
        static COLORS: [Color; 1] = [Color::rgb(0, 0, 0)];
        let config = GlyphConfig::new(&SHAPES, &COLORS, 1, 0, u32::MAX).unwrap();

        let glyphs = map_to_glyphs(&Digest::from_bytes([7; 32]), &config);
        assert_eq!(glyphs[0].width, 7);

        let config = GlyphConfig::new(&SHAPES, &COLORS, 1, u32::MAX - 1, u32::MAX).unwrap();
        let glyphs = map_to_glyphs(&Digest::from_bytes([0xff; 32]), &config);
        assert_eq!(glyphs[0].width, u32::MAX);
    }

    #[test]
    fn test_total_width() {
        let glyphs = map_to_glyphs(&coffee_primary(), &GlyphConfig::V1);
        assert_eq!(glyphs.total_width(), 20 + 26 + 25 + 35 + 25 + 24 + 34 + 22 + 24 + 34);
    }
}
