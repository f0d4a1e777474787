//! Digest Provider - tagged canonical input → 32 pseudo-random bytes
//!
//! Two paths, chosen per call by probing the injected capabilities:
//!
//! ```text
//! tagged input ──► strong primitive present + probe ok? ──yes──► SHA-256 ──► Primary
//!                                │                                  │
//!                                no                             error │
//!                                ▼                                  ▼
//!                         fallback_digest ◄─────────────────────────┘  ──► Fallback
//! ```
//!
//! Both paths are deterministic within themselves. Their bytes differ for
//! the same input and are never meant to agree.

mod fallback;
mod primitive;

pub use fallback::fallback_digest;
pub use primitive::{DigestPrimitive, Sha256Primitive};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Length of every digest in bytes
pub const DIGEST_LEN: usize = 32;

/// A fixed 32-byte digest
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| Error::InvalidDigestLength {
            expected: DIGEST_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Byte at `index`, wrapping modulo the digest length
    pub fn wrapped(&self, index: usize) -> u8 {
        self.0[index % DIGEST_LEN]
    }

    /// Final byte, used as the fingerprint checksum
    pub fn last(&self) -> u8 {
        self.0[DIGEST_LEN - 1]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_hex()
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

/// Which algorithm produced a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestPath {
    /// Strong cryptographic primitive (SHA-256)
    Primary,
    /// Deterministic non-cryptographic mixing
    Fallback,
}

impl fmt::Display for DigestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Environment capabilities handed to the encoder explicitly
#[derive(Clone)]
pub struct Capabilities {
    strong: Option<Arc<dyn DigestPrimitive>>,
}

impl Capabilities {
    /// Built-in SHA-256 primitive. Whether it is usable is still probed per call.
    pub fn detect() -> Self {
        Self::with_primitive(Arc::new(Sha256Primitive))
    }

    /// No strong primitive at all; every digest takes the fallback path
    pub fn none() -> Self {
        Self { strong: None }
    }

    pub fn with_primitive(primitive: Arc<dyn DigestPrimitive>) -> Self {
        Self { strong: Some(primitive) }
    }

    pub fn strong(&self) -> Option<&Arc<dyn DigestPrimitive>> {
        self.strong.as_ref()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("strong", &self.strong.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

/// Chooses a digest path per call and never fails
#[derive(Debug, Clone)]
pub struct DigestProvider {
    capabilities: Capabilities,
}

impl DigestProvider {
    pub fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Digest an already-tagged input.
    ///
    /// Primitive unavailability or failure routes to the fallback path.
    pub async fn digest(&self, tagged: &str) -> (Digest, DigestPath) {
        if let Some(primitive) = self.capabilities.strong() {
            if primitive.probe() {
                match primitive.digest(tagged.as_bytes()).await {
                    Ok(digest) => return (digest, DigestPath::Primary),
                    Err(e) => {
                        tracing::warn!(
                            primitive = primitive.name(),
                            error = %e,
                            "strong digest failed, using fallback"
                        );
                    }
                }
            } else {
                tracing::warn!(primitive = primitive.name(), "strong digest probe failed, using fallback");
            }
        } else {
            tracing::debug!("no strong digest primitive, using fallback");
        }

        (fallback_digest(tagged), DigestPath::Fallback)
    }
}
