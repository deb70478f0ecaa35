//! Shared cache of parsed media query lists
//!
//! The same query strings tend to be matched over and over (one stylesheet,
//! many viewports). Parsed lists are immutable, so they are shared as
//! `Arc<MediaQueryList>` behind a read-mostly lock keyed by the exact query
//! text.

use super::values::MediaValues;
use super::MediaQueryList;
use crate::error::{ParseError, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Number of distinct query strings kept before the cache is reset.
pub const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Hit/miss counters of a [`MediaQueryCache`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
  pub hits: u64,
  pub misses: u64,
}

/// Thread-safe cache from query text to its parsed list
///
/// Failed parses are not cached; asking again re-parses and fails again.
///
/// # Examples
///
/// ```
/// use cssmq::media::{MediaQueryCache, MediaValues};
///
/// let cache = MediaQueryCache::new();
/// let values = MediaValues::screen(1024, 768);
/// assert!(cache.matches("(min-width: 768px)", &values).unwrap());
/// assert!(cache.matches("(min-width: 768px)", &values).unwrap());
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct MediaQueryCache {
  map: RwLock<FxHashMap<String, Arc<MediaQueryList>>>,
  capacity: usize,
  hits: AtomicU64,
  misses: AtomicU64,
}

impl MediaQueryCache {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Creates a cache holding at most `capacity` query strings.
  ///
  /// Inserting past the limit empties the cache first.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      map: RwLock::new(FxHashMap::default()),
      capacity: capacity.max(1),
      hits: AtomicU64::new(0),
      misses: AtomicU64::new(0),
    }
  }

  /// Returns the process-wide cache.
  pub fn global() -> &'static MediaQueryCache {
    static GLOBAL: OnceLock<MediaQueryCache> = OnceLock::new();
    GLOBAL.get_or_init(MediaQueryCache::new)
  }

  /// Returns the cached list for `query` without parsing.
  pub fn get(&self, query: &str) -> Option<Arc<MediaQueryList>> {
    self.map.read().get(query).cloned()
  }

  /// Returns the parsed list for `query`, parsing and caching it on a miss.
  ///
  /// # Errors
  ///
  /// Returns the parse error when `query` is malformed.
  pub fn get_or_parse(&self, query: &str) -> std::result::Result<Arc<MediaQueryList>, ParseError> {
    if let Some(hit) = self.get(query) {
      self.hits.fetch_add(1, Ordering::Relaxed);
      return Ok(hit);
    }
    self.misses.fetch_add(1, Ordering::Relaxed);

    let parsed = Arc::new(MediaQueryList::parse(query)?);
    let mut map = self.map.write();
    if map.len() >= self.capacity && !map.contains_key(query) {
      map.clear();
    }
    // Another thread may have raced us here; keep whichever landed first.
    let entry = map
      .entry(query.to_string())
      .or_insert_with(|| Arc::clone(&parsed));
    Ok(Arc::clone(entry))
  }

  /// Parses (or reuses) `query` and matches it against `values`.
  ///
  /// # Errors
  ///
  /// Fails on malformed queries and on values that cannot be converted.
  pub fn matches(&self, query: &str, values: &MediaValues) -> Result<bool> {
    let queries = self.get_or_parse(query)?;
    Ok(queries.matches(values)?)
  }

  pub fn len(&self) -> usize {
    self.map.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.read().is_empty()
  }

  /// Drops every cached list and resets the counters.
  pub fn clear(&self) {
    self.map.write().clear();
    self.hits.store(0, Ordering::Relaxed);
    self.misses.store(0, Ordering::Relaxed);
  }

  pub fn stats(&self) -> CacheStats {
    CacheStats {
      hits: self.hits.load(Ordering::Relaxed),
      misses: self.misses.load(Ordering::Relaxed),
    }
  }
}

impl Default for MediaQueryCache {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for MediaQueryCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MediaQueryCache")
      .field("len", &self.len())
      .field("capacity", &self.capacity)
      .field("stats", &self.stats())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hit_returns_same_list() {
    let cache = MediaQueryCache::new();
    let first = cache.get_or_parse("screen and (color)").unwrap();
    let second = cache.get_or_parse("screen and (color)").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn test_keyed_by_exact_text() {
    let cache = MediaQueryCache::new();
    cache.get_or_parse("screen").unwrap();
    cache.get_or_parse("screen ").unwrap();
    cache.get_or_parse("SCREEN").unwrap();
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.stats().hits, 0);
  }

  #[test]
  fn test_errors_not_cached() {
    let cache = MediaQueryCache::new();
    assert!(cache.get_or_parse("screen and crap").is_err());
    assert!(cache.get_or_parse("screen and crap").is_err());
    assert!(cache.is_empty());
    assert_eq!(cache.stats().misses, 2);
  }

  #[test]
  fn test_capacity_resets() {
    let cache = MediaQueryCache::with_capacity(2);
    cache.get_or_parse("screen").unwrap();
    cache.get_or_parse("print").unwrap();
    assert_eq!(cache.len(), 2);
    cache.get_or_parse("tv").unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.get("tv").is_some());
    assert!(cache.get("screen").is_none());
  }

  #[test]
  fn test_clear() {
    let cache = MediaQueryCache::new();
    cache.get_or_parse("screen").unwrap();
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.stats(), CacheStats::default());
  }

  #[test]
  fn test_shared_across_threads() {
    let cache = Arc::new(MediaQueryCache::new());
    let values = MediaValues::screen(1024, 768);
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let cache = Arc::clone(&cache);
        let values = values.clone();
        std::thread::spawn(move || cache.matches("screen and (min-width: 767px)", &values))
      })
      .collect();
    for handle in handles {
      assert!(handle.join().unwrap().unwrap());
    }
    assert_eq!(cache.len(), 1);
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 4);
  }
}
