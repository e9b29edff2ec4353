//! # Mapping Cache
//!
//! Memoizes fully resolved configurations per type pair so directive merging
//! and convention scoring run once per pair.
//!
//! Shapeless sources are keyed by their key set, so inputs with many optional
//! fields add one entry per distinct shape seen. Nothing is evicted until
//! `clear()`.
//!
//! The cache is only ever cleared wholesale. Two callers resolving the same
//! pair concurrently may both do the work; the last `put` wins, and both
//! results are identical.

use super::property_mapping::PropertyMapping;
use super::TypePairKey;
use dashmap::DashMap;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Where a resolved property's source key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingOrigin {
    /// A declared directive named the source key (or its bidirectional partner).
    Explicit,
    /// Convention inference paired the property with a source key.
    Convention,
    /// Nothing feeds the property; only a default can populate it.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    pub mapping: PropertyMapping,
    pub origin: MappingOrigin,
}

/// Every destination property's resolved directive for one type pair, in
/// destination declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    key: TypePairKey,
    properties: IndexMap<String, ResolvedProperty>,
}

impl ResolvedConfiguration {
    pub fn new(key: TypePairKey, properties: IndexMap<String, ResolvedProperty>) -> Self {
        Self { key, properties }
    }

    pub fn key(&self) -> &TypePairKey {
        &self.key
    }

    pub fn get(&self, property: &str) -> Option<&ResolvedProperty> {
        self.properties.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedProperty)> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn source_key(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(|p| p.mapping.source_key())
    }
}

#[derive(Debug, Default)]
pub struct MappingCache {
    entries: DashMap<TypePairKey, Arc<ResolvedConfiguration>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MappingCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &TypePairKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &TypePairKey) -> Option<Arc<ResolvedConfiguration>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(entry.value()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn put(&self, key: TypePairKey, configuration: Arc<ResolvedConfiguration>) {
        self.entries.insert(key, configuration);
    }

    pub fn clear(&self) {
        self.entries.clear();
        debug!("Mapping cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut cache_keys: Vec<String> = self.entries.iter().map(|e| e.key().to_string()).collect();
        cache_keys.sort();
        CacheStats {
            cached_pairs: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cache_keys,
        }
    }
}

/// Statistics about the mapping cache
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub cached_pairs: usize,
    pub hits: u64,
    pub misses: u64,
    pub cache_keys: Vec<String>,
}
