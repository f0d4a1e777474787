//! Strong digest primitives

use super::Digest;
use crate::Result;
use async_trait::async_trait;
use sha2::{Digest as _, Sha256};

/// A 256-bit cryptographic digest capability.
///
/// `digest` is async so that primitives backed by an external runtime or
/// device can suspend. Implementations must return identical bytes for
/// identical input.
#[async_trait]
pub trait DigestPrimitive: Send + Sync {
    /// Primitive identifier, for logs
    fn name(&self) -> &str;

    /// Runtime capability check. `false` routes the call to the fallback.
    fn probe(&self) -> bool;

    /// Digest raw bytes into 32 bytes
    async fn digest(&self, data: &[u8]) -> Result<Digest>;
}

/// SHA-256 of "abc", FIPS 180-2 appendix B.1
const SHA256_ABC: [u8; 32] = [
    0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22, 0x23,
    0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00, 0x15, 0xad,
];

/// SHA-256 via the `sha2` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Primitive;

impl Sha256Primitive {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

#[async_trait]
impl DigestPrimitive for Sha256Primitive {
    fn name(&self) -> &str {
        "sha-256"
    }

    /// Known-answer self test
    fn probe(&self) -> bool {
        Self::hash(b"abc") == SHA256_ABC
    }

    async fn digest(&self, data: &[u8]) -> Result<Digest> {
        Ok(Digest::from_bytes(Self::hash(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_passes() {
        assert!(Sha256Primitive.probe());
    }

    #[tokio::test]
    async fn test_sha256_known_answer() {
        let digest = Sha256Primitive.digest(b"abc").await.unwrap();
        assert_eq!(digest.as_bytes(), &SHA256_ABC);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let a = Sha256Primitive.digest("cipher:v1:ship tiny things".as_bytes()).await.unwrap();
        let b = Sha256Primitive.digest("cipher:v1:ship tiny things".as_bytes()).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), "8616e8df97d286ba5affad3ab3fcedf1e7faeaef2375b7346d92cb669bcb5517");
    }
}
