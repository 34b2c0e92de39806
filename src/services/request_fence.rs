//! Per-book request fencing.
//!
//! Every extraction request gets a ticket with a process-wide, strictly
//! increasing id. Only the newest ticket for a book may commit its result;
//! anything older that finishes later is stale and must be discarded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Fencing token for one extraction request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub book_id: String,
    pub request_id: u64,
}

/// Tracks the newest ticket issued per book
pub struct RequestFence {
    next_id: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestFence {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            latest: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a ticket, superseding every earlier ticket for `book_id`
    pub fn issue(&self, book_id: &str) -> Ticket {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        // Allocate under the lock so per-book ids are issued in order
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        latest.insert(book_id.to_string(), request_id);

        Ticket {
            book_id: book_id.to_string(),
            request_id,
        }
    }

    /// Whether `ticket` is still the newest for its book
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ticket.book_id)
            .is_some_and(|&id| id == ticket.request_id)
    }

    /// Newest request id issued for `book_id`
    pub fn latest(&self, book_id: &str) -> Option<u64> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(book_id)
            .copied()
    }
}

impl Default for RequestFence {
    fn default() -> Self {
        Self::new()
    }
}
