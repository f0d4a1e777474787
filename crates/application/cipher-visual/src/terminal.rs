//! Terminal strip using 24-bit ANSI color

use crate::StripRenderer;
use cipher_core::GlyphDescriptor;

/// Pixels of glyph width per trailing space
const PX_PER_CELL: u32 = 12;

const RESET: &str = "\x1b[0m";

/// Terminal output using ANSI escape codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalRenderer {
    use_colors: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn padding(width: u32) -> usize {
        (width / PX_PER_CELL).max(1) as usize
    }
}

impl StripRenderer for TerminalRenderer {
    fn render(&self, glyphs: &[GlyphDescriptor]) -> String {
        let mut out = String::new();

        for (i, glyph) in glyphs.iter().enumerate() {
            if self.use_colors {
                let c = glyph.color;
                out.push_str(&format!("\x1b[38;2;{};{};{}m{}{}", c.r, c.g, c.b, glyph.shape, RESET));
            } else {
                out.push(glyph.shape);
            }
            if i + 1 < glyphs.len() {
                out.push_str(&" ".repeat(Self::padding(glyph.width)));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipher_core::{Color, GlyphSequence};

    fn sample() -> [GlyphDescriptor; 2] {
        [
            GlyphDescriptor { shape: '□', color: Color::rgb(0x22, 0xc5, 0x5e), width: 18 },
            GlyphDescriptor { shape: '⬡', color: Color::rgb(0x4a, 0xde, 0x80), width: 35 },
        ]
    }

    #[test]
    fn test_colored() {
        let out = TerminalRenderer::new().render(&sample());
        assert_eq!(out, "\x1b[38;2;34;197;94m□\x1b[0m \x1b[38;2;74;222;128m⬡\x1b[0m");
    }

    #[test]
    fn test_plain_pads_by_width() {
        let glyphs = [
            GlyphDescriptor { shape: '□', color: Color::rgb(0, 0, 0), width: 35 },
            GlyphDescriptor { shape: '△', color: Color::rgb(0, 0, 0), width: 18 },
            GlyphDescriptor { shape: '○', color: Color::rgb(0, 0, 0), width: 18 },
        ];
        assert_eq!(TerminalRenderer::plain().render(&glyphs), "□  △ ○");
    }

    #[test]
    fn test_empty() {
        assert_eq!(TerminalRenderer::new().render(&GlyphSequence::empty()), "");
    }
}
