//! # Mapping Storage
//!
//! Explicit directives keyed by (source type, destination type, property).
//! Pure key-value storage: no inference happens here.
//!
//! Directives stored under the wildcard source type apply to every source;
//! a directive for a concrete source type wins over the wildcard one for the
//! same property.

use super::property_mapping::PropertyMapping;
use super::{TypePairKey, WILDCARD_SOURCE};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MappingStorage {
    entries: RwLock<HashMap<TypePairKey, IndexMap<String, PropertyMapping>>>,
}

impl MappingStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a directive. A directive with a bidirectional partner also stores
    /// its mirror under the swapped type pair, unless the source is the wildcard
    /// (a mirror needs a concrete destination).
    pub fn add_property_mapping(
        &self,
        source_type: &str,
        destination_type: &str,
        property: &str,
        mapping: PropertyMapping,
    ) {
        let inverse = mapping.inverse(property);
        let mut entries = self.entries.write();

        debug!(
            source_type,
            destination_type, property, "Storing property mapping"
        );
        entries
            .entry(TypePairKey::new(source_type, destination_type))
            .or_default()
            .insert(property.to_string(), mapping);

        if let Some((partner, mirrored)) = inverse {
            if source_type == WILDCARD_SOURCE {
                debug!(
                    destination_type,
                    property, "Wildcard directive has no concrete mirror type, skipping inverse"
                );
                return;
            }
            debug!(
                source_type = destination_type,
                destination_type = source_type,
                property = %partner,
                "Storing mirrored bidirectional mapping"
            );
            entries
                .entry(TypePairKey::new(destination_type, source_type))
                .or_default()
                .insert(partner, mirrored);
        }
    }

    /// Directive for one property: concrete source first, then wildcard.
    pub fn get_mapping(
        &self,
        source_type: &str,
        destination_type: &str,
        property: &str,
    ) -> Option<PropertyMapping> {
        let entries = self.entries.read();
        entries
            .get(&TypePairKey::new(source_type, destination_type))
            .and_then(|m| m.get(property))
            .or_else(|| {
                entries
                    .get(&TypePairKey::new(WILDCARD_SOURCE, destination_type))
                    .and_then(|m| m.get(property))
            })
            .cloned()
    }

    /// All directives that apply to the pair, wildcard ones overridden by concrete ones.
    pub fn get_mappings_for_types(
        &self,
        source_type: &str,
        destination_type: &str,
    ) -> IndexMap<String, PropertyMapping> {
        let entries = self.entries.read();
        let mut merged = entries
            .get(&TypePairKey::new(WILDCARD_SOURCE, destination_type))
            .cloned()
            .unwrap_or_default();

        if source_type != WILDCARD_SOURCE {
            if let Some(specific) = entries.get(&TypePairKey::new(source_type, destination_type)) {
                for (property, mapping) in specific {
                    merged.insert(property.clone(), mapping.clone());
                }
            }
        }
        merged
    }

    pub fn has_mappings(&self, source_type: &str, destination_type: &str) -> bool {
        self.entries
            .read()
            .contains_key(&TypePairKey::new(source_type, destination_type))
    }

    /// Drop every directive whose destination is `destination_type`, wildcard
    /// and concrete sources alike. Returns how many were removed.
    pub fn remove_destination(&self, destination_type: &str) -> usize {
        let mut entries = self.entries.write();
        let mut removed = 0;
        entries.retain(|key, mappings| {
            if key.destination == destination_type {
                removed += mappings.len();
                false
            } else {
                true
            }
        });
        debug!(destination_type, removed, "Removed directives for destination");
        removed
    }

    /// Number of stored directives across all pairs.
    pub fn len(&self) -> usize {
        self.entries.read().values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        debug!("Mapping storage cleared");
    }
}
