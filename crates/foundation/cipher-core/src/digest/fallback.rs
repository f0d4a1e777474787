//! Deterministic non-cryptographic digest
//!
//! FNV-1a over UTF-16 code units seeds a 32-bit state, then xorshift32
//! expands it to 32 bytes, one low byte per round. Not collision
//! resistant. Only determinism and palette spread matter here.

use super::{Digest, DIGEST_LEN};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Digest a tagged input without a cryptographic primitive
pub fn fallback_digest(tagged: &str) -> Digest {
    let mut state = FNV_OFFSET_BASIS;
    for unit in tagged.encode_utf16() {
        state ^= u32::from(unit);
        state = state.wrapping_mul(FNV_PRIME);
    }

    let mut out = [0u8; DIGEST_LEN];
    for byte in out.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *byte = (state & 0xff) as u8;
    }

    Digest::from_bytes(out)
}
