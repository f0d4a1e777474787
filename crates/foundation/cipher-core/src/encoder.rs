//! Encoder - the single entry point: raw text → strip + fingerprint
//!
//! Every call is independent. No state survives between calls; caching
//! the latest result belongs to the caller.

use crate::digest::{Capabilities, Digest, DigestPath, DigestProvider};
use crate::fingerprint::{format_with_separator, Fingerprint};
use crate::glyph::{map_to_glyphs, GlyphSequence};
use crate::normalize::{normalize, CanonicalInput};
use crate::scheme::Scheme;
use serde::{Deserialize, Serialize};

/// Result of one encode call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    pub canonical: CanonicalInput,
    pub glyphs: GlyphSequence,
    pub fingerprint: Fingerprint,
    /// `None` for empty canonical input
    pub digest: Option<Digest>,
    /// `None` for empty canonical input
    pub path: Option<DigestPath>,
}

impl Encoding {
    /// The canonical empty result
    pub fn empty() -> Self {
        Self {
            canonical: normalize(""),
            glyphs: GlyphSequence::empty(),
            fingerprint: Fingerprint::empty(),
            digest: None,
            path: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Text-to-glyph encoder bound to one scheme and one set of capabilities
#[derive(Debug, Clone)]
pub struct Encoder {
    scheme: Scheme,
    provider: DigestProvider,
}

impl Encoder {
    pub fn new(scheme: Scheme, capabilities: Capabilities) -> Self {
        Self {
            scheme,
            provider: DigestProvider::new(capabilities),
        }
    }

    /// Scheme v1 with the built-in SHA-256 primitive
    pub fn v1() -> Self {
        Self::new(Scheme::V1, Capabilities::detect())
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.provider.capabilities()
    }

    /// Encode raw text. Never fails.
    pub async fn encode(&self, raw: &str) -> Encoding {
        let canonical = normalize(raw);
        if canonical.is_empty() {
            return Encoding::empty();
        }

        let tagged = canonical.tagged(self.scheme.tag);
        let (digest, path) = self.provider.digest(&tagged).await;
        let glyphs = map_to_glyphs(&digest, &self.scheme.glyphs);
        let fingerprint = format_with_separator(&glyphs, &digest, self.scheme.separator);

        tracing::debug!(%path, %fingerprint, chars = canonical.as_str().chars().count(), "encoded");

        Encoding {
            canonical,
            glyphs,
            fingerprint,
            digest: Some(digest),
            path: Some(path),
        }
    }
}
