//! Loop-prevention fingerprint cache.
//!
//! A module that rewrites the clipboard produces new content that
//! would otherwise re-trigger the change detector on the very next
//! tick. The pipeline records the module's output here immediately
//! after dispatch, so the resulting echo is recognized and never
//! re-enters the pipeline.
//!
//! The cache is bounded (oldest entry by `first_seen_at` is evicted
//! once capacity is exceeded) and time-windowed: an entry only
//! suppresses reprocessing while `now - last_seen_at` is inside the
//! cooldown window.

use std::time::{Duration, Instant};

use crate::clipboard::Fingerprint;

#[derive(Debug, Clone)]
pub struct FingerprintEntry {
    pub hash: Fingerprint,
    pub first_seen_at: Instant,
    pub last_seen_at: Instant,
}

pub struct ContentFingerprintCache {
    entries: Vec<FingerprintEntry>,
    capacity: usize,
    cooldown: Duration,
}

impl ContentFingerprintCache {
    pub fn new(capacity: usize, cooldown: Duration) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            cooldown,
        }
    }

    /// True iff `content` was recorded and is still inside the
    /// cooldown window.
    pub fn has_processed(&self, content: &str) -> bool {
        self.has_processed_at(content, Instant::now())
    }

    /// Insert `content`, or refresh its `last_seen_at` if already
    /// present. Evicts the oldest entry when over capacity.
    pub fn record(&mut self, content: &str) {
        self.record_at(content, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current entries, oldest first. Used by status reporting and by
    /// tests asserting the cache survives pause/resume untouched.
    pub fn fingerprints(&self) -> Vec<Fingerprint> {
        self.entries.iter().map(|e| e.hash.clone()).collect()
    }

    fn has_processed_at(&self, content: &str, now: Instant) -> bool {
        let hash = Fingerprint::of_text(content);
        self.entries
            .iter()
            .any(|e| e.hash == hash && now.duration_since(e.last_seen_at) < self.cooldown)
    }

    fn record_at(&mut self, content: &str, now: Instant) {
        let hash = Fingerprint::of_text(content);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.hash == hash) {
            entry.last_seen_at = now;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.first_seen_at)
                .map(|(i, _)| i)
            {
                self.entries.remove(oldest);
            }
        }

        self.entries.push(FingerprintEntry {
            hash,
            first_seen_at: now,
            last_seen_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize, cooldown_ms: u64) -> ContentFingerprintCache {
        ContentFingerprintCache::new(capacity, Duration::from_millis(cooldown_ms))
    }

    #[test]
    fn recorded_content_is_reported_processed_within_cooldown() {
        let mut cache = cache(8, 3000);
        cache.record("# Title");
        assert!(cache.has_processed("# Title"));
        assert!(!cache.has_processed("something else"));
    }

    #[test]
    fn entry_expires_after_cooldown_window() {
        let mut cache = cache(8, 50);
        let start = Instant::now();
        cache.record_at("stale", start);

        assert!(cache.has_processed_at("stale", start + Duration::from_millis(49)));
        assert!(!cache.has_processed_at("stale", start + Duration::from_millis(50)));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut cache = cache(5, 3000);
        for i in 0..50 {
            cache.record(&format!("content-{i}"));
            assert!(cache.len() <= 5);
        }
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn eviction_removes_oldest_by_first_seen() {
        let mut cache = cache(2, 60_000);
        let t0 = Instant::now();
        cache.record_at("first", t0);
        cache.record_at("second", t0 + Duration::from_millis(1));

        // Refreshing "first" updates last_seen_at but not its age.
        cache.record_at("first", t0 + Duration::from_millis(2));

        cache.record_at("third", t0 + Duration::from_millis(3));

        let now = t0 + Duration::from_millis(4);
        assert!(!cache.has_processed_at("first", now), "oldest entry evicted");
        assert!(cache.has_processed_at("second", now));
        assert!(cache.has_processed_at("third", now));
    }

    #[test]
    fn refresh_extends_the_cooldown_window() {
        let mut cache = cache(8, 100);
        let t0 = Instant::now();
        cache.record_at("refreshed", t0);
        cache.record_at("refreshed", t0 + Duration::from_millis(80));

        assert!(cache.has_processed_at("refreshed", t0 + Duration::from_millis(150)));
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut cache = cache(0, 3000);
        cache.record("only");
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
    }
}
