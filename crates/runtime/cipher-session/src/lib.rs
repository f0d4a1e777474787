//! # Cipher Session
//!
//! Everything the encoder deliberately does not own: which result is
//! current, what the user typed last, and the preset phrases.
//!
//! ```text
//!  submit("a") ─ticket 1─► encode ····slow····► stale, discarded
//!  submit("b") ─ticket 2─► encode ─► applied ─► watch channel ─► renderers
//!                                       └──► LastInputStore
//! ```

pub mod presets;
pub mod session;
pub mod store;

pub use presets::{default_preset, random_preset, PRESETS};
pub use session::{Applied, EncodeSession, Snapshot};
pub use store::{FileStore, LastInputStore, MemoryStore, StoredInput};

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors from the session layer. Only store operations can fail.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported store version {0}")]
    UnsupportedVersion(u32),
}
