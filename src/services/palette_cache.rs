//! Memoized cover analyses with LRU eviction.
//!
//! Keyed by image identity: the same cover bytes with the same title and
//! author always analyze to the same result, so the engine only runs once
//! per distinct cover.

use cover_palette::Analysis;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Cache state guarded by the mutex
struct Entries {
    map: HashMap<String, Analysis>,
    /// Keys by last use (oldest first)
    order: Vec<String>,
    max_entries: usize,
}

impl Entries {
    fn get(&mut self, key: &str) -> Option<Analysis> {
        let analysis = self.map.get(key)?.clone();

        // Move to end (mark as recently used)
        self.order.retain(|k| k != key);
        self.order.push(key.to_string());

        Some(analysis)
    }

    fn store(&mut self, key: String, analysis: Analysis) {
        if self.map.contains_key(&key) {
            self.order.retain(|k| k != &key);
        }

        while self.map.len() >= self.max_entries && !self.order.is_empty() {
            let oldest = self.order.remove(0);
            self.map.remove(&oldest);
            tracing::debug!(
                key = %oldest,
                cache_size = self.map.len(),
                "Palette cache: evicted oldest entry"
            );
        }

        self.map.insert(key.clone(), analysis);
        self.order.push(key);
    }
}

/// Thread-safe LRU cache of [`Analysis`] values
pub struct PaletteCache {
    entries: Mutex<Entries>,
}

impl PaletteCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(Entries {
                map: HashMap::new(),
                order: Vec::new(),
                max_entries: max_entries.max(1),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Analysis> {
        let result = self.lock().get(key);
        if result.is_some() {
            tracing::debug!(cache_key = %key, "Palette cache hit");
        } else {
            tracing::debug!(cache_key = %key, "Palette cache miss");
        }
        result
    }

    pub fn store(&self, key: String, analysis: Analysis) {
        tracing::debug!(cache_key = %key, "Palette cache: stored analysis");
        self.lock().store(key, analysis);
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the cache key for a cover.
///
/// SHA-256 over the encoded bytes, title and author, hex encoded.
pub fn compute_cache_key(cover: &[u8], title: Option<&str>, author: Option<&str>) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"cover:");
    hasher.update(cover);
    // Length-prefix the text fields so ("ab", "c") and ("a", "bc") differ
    for field in [title, author] {
        let text = field.map(str::trim).unwrap_or_default();
        hasher.update(b"|");
        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
    }

    hex::encode(hasher.finalize())
}
