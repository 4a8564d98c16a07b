#![allow(dead_code)]

//! Prediction cache: bounded, TTL-based key → score map in front of the engine.
//!
//! Expiry is lazy: an expired entry is dropped by the `get` that finds it.
//! Eviction is FIFO by insertion order, not LRU; reads never reorder entries.
//! The cache is an explicit instance shared through `AppState`, never a global.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 1000;
pub const DEFAULT_TTL_SECS: i64 = 60 * 60;

/// Characters of each input that feed the cache key.
const KEY_PREFIX_CHARS: usize = 100;

/// Time source, swappable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    score: f64,
    created_at: DateTime<Utc>,
    seq: u64,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    /// Insertion order as (key, seq). Pairs whose seq no longer matches the
    /// live entry are stale and skipped on eviction.
    order: VecDeque<(String, u64)>,
    next_seq: u64,
}

impl CacheInner {
    fn evict_oldest(&mut self) -> Option<String> {
        while let Some((key, seq)) = self.order.pop_front() {
            if self.entries.get(&key).is_some_and(|e| e.seq == seq) {
                self.entries.remove(&key);
                return Some(key);
            }
        }
        None
    }

    /// Drops stale order pairs once they outnumber live entries.
    fn compact_order(&mut self, capacity: usize) {
        if self.order.len() > capacity * 2 {
            let entries = &self.entries;
            self.order
                .retain(|(key, seq)| entries.get(key).is_some_and(|e| e.seq == *seq));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Percentage of lookups that hit, 0 when nothing was looked up.
    pub hit_rate: f64,
}

pub struct PredictionCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for PredictionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionCache {
    pub fn new() -> Self {
        Self::with_clock(
            DEFAULT_CAPACITY,
            Duration::seconds(DEFAULT_TTL_SECS),
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity: capacity.max(1),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The cached score for `key`, or `None` if absent or older than the TTL.
    pub fn get(&self, key: &str) -> Option<f64> {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        let entry = match inner.entries.get(key) {
            Some(entry) => *entry,
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        if now - entry.created_at > self.ttl {
            inner.entries.remove(key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key, "prediction cache entry expired");
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(entry.score)
    }

    /// Stores `score` under `key`. A new key evicts the oldest-inserted entry
    /// when the cache is full; overwriting keeps the key's original slot.
    pub fn set(&self, key: &str, score: f64) {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        if let Some(entry) = inner.entries.get_mut(key) {
            entry.score = score;
            entry.created_at = now;
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some(evicted) = inner.evict_oldest() {
                debug!(key = %evicted, "prediction cache evicted oldest entry");
            }
        }

        inner.compact_order(self.capacity);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.order.push_back((key.to_string(), seq));
        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                score,
                created_at: now,
                seq,
            },
        );
    }

    /// Cached score for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> (f64, bool)
    where
        F: FnOnce() -> f64,
    {
        if let Some(score) = self.get(key) {
            return (score, true);
        }
        let score = compute();
        self.set(key, score);
        (score, false)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        CacheStats {
            size: self.len(),
            capacity: self.capacity,
            hits,
            misses,
            hit_rate: if lookups > 0 {
                hits as f64 / lookups as f64 * 100.0
            } else {
                0.0
            },
        }
    }

    /// Key for a (text, reference) pair: a rolling hash of each input's first
    /// 100 UTF-16 units, base-36 encoded. Inputs sharing those prefixes collide.
    pub fn generate_key(text: &str, reference: Option<&str>) -> String {
        format!(
            "{}_{}",
            to_base36(prefix_hash(text)),
            to_base36(prefix_hash(reference.unwrap_or("")))
        )
    }
}

/// `h = h * 31 + unit` in wrapping 32-bit arithmetic.
fn prefix_hash(text: &str) -> i32 {
    text.encode_utf16()
        .take(KEY_PREFIX_CHARS)
        .fold(0i32, |h, unit| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32)
        })
}

fn to_base36(value: i32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
