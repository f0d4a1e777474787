//! # Cipher Visual
//!
//! Renderers for glyph strips. They only consume the encoder's output;
//! nothing here feeds back into encoding.

mod svg;
mod terminal;

pub use svg::SvgRenderer;
pub use terminal::TerminalRenderer;

use cipher_core::GlyphDescriptor;

/// Draws a glyph strip, left to right, in sequence order
pub trait StripRenderer {
    fn render(&self, glyphs: &[GlyphDescriptor]) -> String;
}
