//! Memoization of reshaped tables.

use std::{num::NonZeroUsize, sync::Arc};

use lru::LruCache;
use polars::prelude::DataFrame;
use scr_primitives::TableId;

use crate::{LongTable, ReshapeConfig, ReshapeError, reshape};

/// Default number of cached long tables.
const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    table: TableId,
    config: ReshapeConfig,
}

/// Hit and miss counters of a [`ReshapeCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the pipeline.
    pub misses: u64,
}

/// Least-recently-used cache of reshaped tables.
///
/// Entries are keyed by the identity of the input table and the full
/// [`ReshapeConfig`]; a change to either runs the pipeline again. Failed
/// reshapes are not cached.
pub struct ReshapeCache {
    entries: LruCache<CacheKey, Arc<LongTable>>,
    stats: CacheStats,
}

impl ReshapeCache {
    /// Create a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache holding up to `capacity` tables (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: LruCache::new(capacity), stats: CacheStats::default() }
    }

    /// Return the cached long table for `(table, config)`, reshaping `df` on
    /// a miss.
    ///
    /// `df` must be the table identified by `table`.
    ///
    /// # Errors
    /// Returns `ReshapeError` if reshaping fails.
    pub fn get_or_reshape(
        &mut self,
        table: TableId,
        df: &DataFrame,
        config: &ReshapeConfig,
    ) -> Result<Arc<LongTable>, ReshapeError> {
        let key = CacheKey { table, config: config.clone() };
        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            tracing::debug!(%table, "reshape cache hit");
            return Ok(Arc::clone(hit));
        }

        self.stats.misses += 1;
        tracing::debug!(%table, "reshape cache miss");
        let long = Arc::new(reshape(df, config)?);
        self.entries.put(key, Arc::clone(&long));
        Ok(long)
    }

    /// Drop every entry computed from `table`.
    ///
    /// # Returns
    /// Number of entries removed.
    pub fn invalidate_table(&mut self, table: TableId) -> usize {
        let stale: Vec<CacheKey> =
            self.entries.iter().filter(|(k, _)| k.table == table).map(|(k, _)| k.clone()).collect();
        for key in &stale {
            self.entries.pop(key);
        }
        stale.len()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit and miss counters.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ReshapeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReshapeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReshapeCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}
