//! Keyed memoization of history fetches

use crate::error::Result;
use crate::query::HistoryQuery;
use crate::series::HistoricalSeries;
use crate::PriceSource;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A memoized series and when it was fetched
#[derive(Debug, Clone)]
pub struct CachedSeries {
    pub series: Arc<HistoricalSeries>,
    pub fetched_at: DateTime<Utc>,
}

/// Compute-once cache in front of a [`PriceSource`].
///
/// Entries are keyed by the full query, so a query with a new end date
/// (the next day) misses and fetches again. A successful refetch replaces
/// the entries for the same symbol and start with other end dates.
/// Failures are never cached.
#[derive(Debug)]
pub struct FetchCache<S> {
    source: S,
    entries: HashMap<HistoryQuery, CachedSeries>,
}

impl<S: PriceSource> FetchCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// Return the series for `query`, fetching it on first use
    pub fn get(&mut self, query: &HistoryQuery) -> Result<Arc<HistoricalSeries>> {
        if let Some(hit) = self.entries.get(query) {
            debug!(%query, fetched_at = %hit.fetched_at, "history cache hit");
            return Ok(Arc::clone(&hit.series));
        }

        debug!(%query, source = self.source.name(), "history cache miss");
        let series = Arc::new(self.source.fetch(query)?);
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key.symbol != query.symbol || key.start != query.start);
        if self.entries.len() < before {
            debug!(%query, dropped = before - self.entries.len(), "dropped stale history");
        }
        self.entries.insert(
            query.clone(),
            CachedSeries {
                series: Arc::clone(&series),
                fetched_at: Utc::now(),
            },
        );
        Ok(series)
    }

    /// When `query` was last fetched, if it is cached
    pub fn fetched_at(&self, query: &HistoryQuery) -> Option<DateTime<Utc>> {
        self.entries.get(query).map(|entry| entry.fetched_at)
    }

    /// Drop every entry
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
