//! SVG strip renderer

use crate::StripRenderer;
use cipher_core::GlyphDescriptor;
use std::fmt::Write;

/// First glyph x position
const START_X: u32 = 22;
const CORNER_RADIUS: u32 = 18;
const BASELINE_INSET: u32 = 18;
const GLYPH_FONT_PX: u32 = 28;
const LABEL: &str = "Cipher strip";

/// Renders a strip as a standalone SVG document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(520, 84)
    }
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn render_glyphs(&self, glyphs: &[GlyphDescriptor]) -> String {
        let y = self.height as f32 / 2.0_f32;
        let mut x = START_X;
        let mut out = String::new();

        for glyph in glyphs {
            let _ = writeln!(
                out,
                r#"  <text x="{x}" y="{y:.1}" fill="{color}" font-size="{size}" font-family="ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace" dominant-baseline="middle">{shape}</text>"#,
                color = glyph.color.to_hex(),
                size = GLYPH_FONT_PX,
                shape = xml_escape(&glyph.shape.to_string()),
            );
            let _ = writeln!(
                out,
                r#"  <rect x="{tx}" y="{ty:.1}" width="1.5" height="10" fill="rgba(226,232,240,.35)"/>"#,
                tx = x + 10,
                ty = y + 18.0_f32,
            );
            x += glyph.width;
        }

        out
    }
}

impl StripRenderer for SvgRenderer {
    fn render(&self, glyphs: &[GlyphDescriptor]) -> String {
        let w = self.width;
        let h = self.height;
        let r = CORNER_RADIUS.min(w / 2).min(h / 2);
        let mid = h as f32 / 2.0_f32;

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{label}">
  <defs>
    <linearGradient id="card" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="rgba(255,255,255,.06)"/>
      <stop offset="100%" stop-color="rgba(0,0,0,.14)"/>
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" rx="{r}" ry="{r}" fill="url(#card)"/>
  <line x1="{x1}" y1="{mid:.1}" x2="{x2}" y2="{mid:.1}" stroke="rgba(148,163,184,.22)" stroke-width="1"/>
{glyphs}  <text x="16" y="18" fill="rgba(148,163,184,.85)" font-size="12" font-family="ui-sans-serif, system-ui, sans-serif">{label}</text>
</svg>
"#,
            x1 = BASELINE_INSET,
            x2 = w.saturating_sub(BASELINE_INSET),
            glyphs = self.render_glyphs(glyphs),
            label = LABEL,
        )
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
