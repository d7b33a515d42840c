//! Resampled point caching.
//!
//! Redraw and animation code asks for the same sigil at the same resolution
//! over and over. [`PointCache`] keeps each resampled sequence behind an
//! [`Arc`] so repeated requests share one buffer.
//!
//! # Features
//! - Point sequences keyed by the exact bit pattern of the step distance
//! - Hit/miss statistics for diagnostics
//! - Memory estimation for monitoring
//!
//! # Example
//! ```ignore
//! let mut cache = PointCache::new();
//! let points = cache.get_or_try_insert(0.05, || shape.resample(0.05))?;
//! println!("entries: {}", cache.stats().entries);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::core::Point2;

/// Cache key for a sampling resolution. `0.0` and `-0.0` share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ResolutionKey(u64);

impl ResolutionKey {
    fn new(step: f64) -> Self {
        let step = if step == 0.0 { 0.0 } else { step };
        Self(step.to_bits())
    }
}

/// Shared buffer for cached point data (avoids cloning on every access).
pub type SharedPoints = Arc<Vec<Point2>>;

#[derive(Debug, Default)]
pub struct PointCache {
    entries: HashMap<ResolutionKey, SharedPoints>,
    hits: usize,
    misses: usize,
}

/// Cache statistics for diagnostics and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointCacheStats {
    /// Number of cached resolutions.
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    /// Estimated memory usage in bytes.
    pub estimated_memory_bytes: usize,
}

impl PointCacheStats {
    /// Returns the cache hit rate as a value between 0.0 and 1.0.
    /// Returns 0.0 if no cache accesses have been made.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl PointCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> PointCacheStats {
        PointCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            estimated_memory_bytes: self.estimate_memory_usage(),
        }
    }

    /// Clears all cached data and resets hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Estimates the memory usage of all cached data in bytes.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        let points: usize = self
            .entries
            .values()
            .map(|points| points.len() * std::mem::size_of::<Point2>())
            .sum();
        points + self.entries.len() * std::mem::size_of::<(ResolutionKey, SharedPoints)>()
    }

    #[must_use]
    pub fn contains(&self, step: f64) -> bool {
        self.entries.contains_key(&ResolutionKey::new(step))
    }

    /// Returns the cached points for `step`, computing them with `make` on a
    /// miss. Failed computations are not cached.
    ///
    /// # Errors
    /// Whatever `make` returns.
    pub fn get_or_try_insert<E>(
        &mut self,
        step: f64,
        make: impl FnOnce() -> Result<Vec<Point2>, E>,
    ) -> Result<SharedPoints, E> {
        let key = ResolutionKey::new(step);
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(cached));
        }
        self.misses += 1;
        let points = Arc::new(make()?);
        self.entries.insert(key, Arc::clone(&points));
        Ok(points)
    }
}
