//! Input canonicalization
//!
//! Trims surrounding whitespace and lowercases. Internal whitespace is kept
//! exactly as typed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical (trimmed, lowercased) form of user text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalInput(String);

impl CanonicalInput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty canonical input skips digesting entirely
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefix with a domain-separation tag
    pub fn tagged(&self, tag: &str) -> String {
        let mut out = String::with_capacity(tag.len() + self.0.len());
        out.push_str(tag);
        out.push_str(&self.0);
        out
    }
}

impl fmt::Display for CanonicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Characters stripped from both ends.
///
/// Unicode whitespace plus the byte-order mark, which pasted text often
/// carries. NEL (U+0085) is kept so fingerprints match the browser's
/// `String.prototype.trim`.
fn is_trimmed(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

/// Canonicalize raw text. Total over all strings.
pub fn normalize(raw: &str) -> CanonicalInput {
    CanonicalInput(raw.trim_matches(is_trimmed).to_lowercase())
}
