//! Last-writer-wins encode session
//!
//! Each `submit` takes a ticket when it is triggered. When its encode
//! completes, the result is applied only if no newer ticket has been
//! issued in the meantime. Trigger order decides, not completion order,
//! so a slow digest for old text can never overwrite newer text.

use crate::presets::{default_preset, random_preset};
use crate::store::LastInputStore;
use cipher_core::{Encoder, Encoding};
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// The currently applied state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Ticket of the submit that produced this snapshot. 0 = initial.
    pub ticket: u64,
    /// Text as submitted, after the length cap
    pub text: String,
    pub encoding: Encoding,
}

impl Snapshot {
    fn initial() -> Self {
        Self {
            ticket: 0,
            text: String::new(),
            encoding: Encoding::empty(),
        }
    }
}

/// Outcome of a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Became the current snapshot
    Current(Snapshot),
    /// Discarded; a newer submit was triggered before this one finished
    Stale { ticket: u64, superseded_by: u64 },
}

impl Applied {
    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current(_))
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Current(snapshot) => Some(snapshot),
            Self::Stale { .. } => None,
        }
    }
}

/// Owns "current text / current strip" on behalf of a UI
pub struct EncodeSession {
    encoder: Encoder,
    store: Option<Arc<dyn LastInputStore>>,
    max_input_chars: Option<usize>,
    latest_ticket: AtomicU64,
    current: watch::Sender<Snapshot>,
    /// Serializes store writes
    persist_lock: Mutex<()>,
}

impl EncodeSession {
    pub fn new(encoder: Encoder) -> Self {
        let (current, _) = watch::channel(Snapshot::initial());
        Self {
            encoder,
            store: None,
            max_input_chars: None,
            latest_ticket: AtomicU64::new(0),
            current,
            persist_lock: Mutex::new(()),
        }
    }

    /// Persist every applied input
    pub fn with_store(mut self, store: Arc<dyn LastInputStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Truncate submitted text to `max` characters
    pub fn with_max_input_chars(mut self, max: Option<usize>) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Latest applied snapshot
    pub fn current(&self) -> Snapshot {
        self.current.borrow().clone()
    }

    /// Receive every applied snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.current.subscribe()
    }

    /// Encode `text` and apply it unless a newer submit was triggered first
    pub async fn submit(&self, text: &str) -> Applied {
        let text = truncate_chars(text, self.max_input_chars);
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let encoding = self.encoder.encode(&text).await;

        let mut superseded_by = ticket;
        let mut snapshot = None;
        let applied = self.current.send_if_modified(|current| {
            let latest = self.latest_ticket.load(Ordering::SeqCst);
            if latest != ticket {
                superseded_by = latest;
                return false;
            }

            let next = Snapshot {
                ticket,
                text: text.clone(),
                encoding: encoding.clone(),
            };
            *current = next.clone();
            snapshot = Some(next);
            true
        });

        match snapshot {
            Some(snapshot) if applied => {
                self.persist(&snapshot);
                Applied::Current(snapshot)
            }
            _ => {
                tracing::debug!(ticket, superseded_by, "discarding stale encode");
                Applied::Stale { ticket, superseded_by }
            }
        }
    }

    /// Re-encode the stored input, or the default preset when none
    pub async fn restore(&self) -> Applied {
        let stored = match &self.store {
            Some(store) => store.load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not load last input");
                None
            }),
            None => None,
        };

        let text = stored.unwrap_or_else(|| default_preset().to_string());
        self.submit(&text).await
    }

    /// Submit a random preset chosen by `rng`
    pub async fn submit_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Applied {
        let preset = random_preset(rng);
        self.submit(preset).await
    }

    /// Empty the strip and remove the stored input
    pub async fn clear(&self) -> Applied {
        self.submit("").await
    }

    /// Store an applied snapshot unless a newer submit was triggered since.
    ///
    /// Runs after the watch lock is released, so subscribers never wait on
    /// store I/O. The store call itself is synchronous and blocks the
    /// calling task for its duration. Writes are serialized and re-check
    /// the ticket under `persist_lock`, so an older text never lands after
    /// a newer one.
    fn persist(&self, snapshot: &Snapshot) {
        let Some(store) = &self.store else {
            return;
        };

        let _guard = self.persist_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.latest_ticket.load(Ordering::SeqCst) != snapshot.ticket {
            tracing::debug!(ticket = snapshot.ticket, "newer input pending, not storing");
            return;
        }

        let result = if snapshot.encoding.is_empty() {
            store.clear()
        } else {
            store.save(&snapshot.text)
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not store last input");
        }
    }
}

fn truncate_chars(text: &str, max: Option<usize>) -> String {
    match max {
        Some(max) => text.chars().take(max).collect(),
        None => text.to_string(),
    }
}
