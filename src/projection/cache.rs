//! Memoized projections keyed by the full input and the as-of date
//!
//! A projection is a pure function of `(ProjectionInput, as_of)`, so an
//! interactive session can hand back the same `Arc<Projection>` for repeated
//! requests instead of recomputing the ledger. The cache holds at most
//! `capacity` entries and evicts the oldest insertion first.

use super::engine::ProjectionEngine;
use super::records::Projection;
use crate::error::ProjectionError;
use crate::input::ProjectionInput;
use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Entries kept by [`ProjectionCache::new`]: the last request of a session
pub const DEFAULT_CAPACITY: usize = 1;

/// Bounded cache of completed projections for one engine
#[derive(Debug)]
pub struct ProjectionCache {
    engine: ProjectionEngine,
    capacity: usize,
    entries: HashMap<String, Arc<Projection>>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new(ProjectionEngine::default())
    }
}

impl ProjectionCache {
    pub fn new(engine: ProjectionEngine) -> Self {
        Self::with_capacity(engine, DEFAULT_CAPACITY)
    }

    /// Keep up to `capacity` projections; zero disables caching
    pub fn with_capacity(engine: ProjectionEngine, capacity: usize) -> Self {
        Self {
            engine,
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached projection or compute and store it; failures are not cached
    pub fn get_or_compute(
        &mut self,
        input: &ProjectionInput,
        as_of: NaiveDate,
    ) -> Result<Arc<Projection>, ProjectionError> {
        let key = cache_key(input, as_of);

        if let Some(projection) = key.as_ref().and_then(|k| self.entries.get(k)) {
            self.hits += 1;
            log::debug!("projection cache hit ({} entries)", self.entries.len());
            return Ok(Arc::clone(projection));
        }

        self.misses += 1;
        let projection = Arc::new(self.engine.project(input, as_of)?);

        match key {
            Some(key) => self.insert(key, Arc::clone(&projection)),
            None => log::warn!("input could not be encoded as a cache key; result not cached"),
        }

        Ok(projection)
    }

    fn insert(&mut self, key: String, projection: Arc<Projection>) {
        if self.capacity == 0 {
            return;
        }
        while self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                log::debug!("projection cache full, evicted oldest entry");
            }
        }
        log::debug!("projection cache miss, storing entry {}", self.order.len() + 1);
        self.order.push_back(key.clone());
        self.entries.insert(key, projection);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Canonical JSON of the request; field order is fixed by the derive
fn cache_key(input: &ProjectionInput, as_of: NaiveDate) -> Option<String> {
    serde_json::to_string(&(input, as_of)).ok()
}
