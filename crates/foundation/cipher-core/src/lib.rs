//! # Cipher Core
//!
//! Deterministic text-to-glyph encoder. A short phrase becomes a compact
//! strip of colored shapes plus a copyable fingerprint.
//!
//! ```text
//! raw text ──► normalize ──► tag + digest ──┬──► map_to_glyphs ──► GlyphSequence
//!                                           │                         │
//!                                           └──► format_fingerprint ◄─┘
//! ```
//!
//! Same phrase (after trimming and lowercasing) always yields the same
//! strip on the same digest path. Different phrases spread across the
//! palette space with high probability.

pub mod digest;
pub mod encoder;
pub mod fingerprint;
pub mod glyph;
pub mod normalize;
pub mod scheme;

pub use digest::{fallback_digest, Capabilities, Digest, DigestPath, DigestPrimitive, DigestProvider, Sha256Primitive};
pub use encoder::{Encoder, Encoding};
pub use fingerprint::{format_fingerprint, format_with_separator, Fingerprint, CHECKSUM_SEPARATOR};
pub use glyph::{map_to_glyphs, GlyphDescriptor, GlyphSequence, COLOR_OFFSET, WIDTH_OFFSET};
pub use normalize::{normalize, CanonicalInput};
pub use scheme::{Color, GlyphConfig, Scheme};

/// Result type for cipher-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cipher-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Digest primitive unavailable: {0}")]
    PrimitiveUnavailable(String),

    #[error("Invalid scheme: {0}")]
    InvalidScheme(String),

    #[error("Invalid digest length: expected {expected}, got {got}")]
    InvalidDigestLength { expected: usize, got: usize },

    #[error("Invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
