//! Fingerprint - short copyable summary of a strip
//!
//! `<shapes>·<last digest byte as two uppercase hex digits>`

use crate::digest::Digest;
use crate::glyph::GlyphSequence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the shape string and the checksum tail
pub const CHECKSUM_SEPARATOR: char = '·';

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checksum tail after the separator, if any
    pub fn checksum(&self) -> Option<&str> {
        self.0.rsplit_once(CHECKSUM_SEPARATOR).map(|(_, tail)| tail)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format with the default separator
pub fn format_fingerprint(glyphs: &GlyphSequence, digest: &Digest) -> Fingerprint {
    format_with_separator(glyphs, digest, CHECKSUM_SEPARATOR)
}

/// Empty glyph sequences produce an empty fingerprint with no tail
pub fn format_with_separator(glyphs: &GlyphSequence, digest: &Digest, separator: char) -> Fingerprint {
    if glyphs.is_empty() {
        return Fingerprint::empty();
    }

    let mut out = glyphs.shapes();
    out.push(separator);
    out.push_str(&format!("{:02X}", digest.last()));
    Fingerprint(out)
}
