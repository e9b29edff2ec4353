//! Resolving a destination type's properties against one source shape.
//!
//! Declared directives are taken as they are. Properties without a source key
//! are paired with a record key by naming convention; when several properties
//! want the same key, the best score keeps it (ties to the property declared
//! first) and the others stay unresolved.

use crate::input::RawRecord;
use crate::mapping::{
    MappingOrigin, MappingStorage, ResolvedConfiguration, ResolvedProperty, SourceType,
    TypeDescriptor, TypePairKey,
};
use crate::naming::{ConventionMatcher, NameMatch};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, trace};

pub(crate) fn resolve_properties(
    storage: &MappingStorage,
    matcher: &ConventionMatcher,
    source: &SourceType,
    record: &RawRecord,
    descriptor: &TypeDescriptor,
) -> ResolvedConfiguration {
    let directives = storage.get_mappings_for_types(source.name(), descriptor.name());
    let mut resolved: IndexMap<String, ResolvedProperty> = IndexMap::new();
    let mut claims: Vec<(String, NameMatch)> = Vec::new();

    for property in descriptor.properties() {
        let mapping = directives.get(property).cloned().unwrap_or_default();

        if mapping.is_ignored() || mapping.effective_source_key().is_some() {
            resolved.insert(
                property.clone(),
                ResolvedProperty {
                    mapping,
                    origin: MappingOrigin::Explicit,
                },
            );
            continue;
        }

        if let Some(found) = matcher.best_match(property, record.keys().map(String::as_str)) {
            trace!(
                property = %property,
                source_key = %found.source_key,
                confidence = found.confidence,
                "Convention candidate"
            );
            claims.push((property.clone(), found));
        }
        resolved.insert(
            property.clone(),
            ResolvedProperty {
                mapping,
                origin: MappingOrigin::Unresolved,
            },
        );
    }

    // Claims are in declaration order, so a strict comparison keeps the earlier
    // property on equal scores.
    let mut winners: HashMap<&str, (&str, f64)> = HashMap::new();
    for (property, found) in &claims {
        let keep_current = winners
            .get(found.source_key.as_str())
            .is_some_and(|(_, best)| *best >= found.confidence);
        if !keep_current {
            winners.insert(found.source_key.as_str(), (property.as_str(), found.confidence));
        }
    }

    for (property, found) in &claims {
        let won = winners
            .get(found.source_key.as_str())
            .is_some_and(|(winner, _)| *winner == property.as_str());
        if !won {
            debug!(
                property = %property,
                source_key = %found.source_key,
                "Source key claimed by a better match, leaving property unresolved"
            );
            continue;
        }
        if let Some(entry) = resolved.get_mut(property) {
            entry.mapping = entry.mapping.with_inferred_source(&found.source_key);
            entry.origin = MappingOrigin::Convention;
        }
    }

    ResolvedConfiguration::new(
        TypePairKey::new(source.cache_id(), descriptor.name()),
        resolved,
    )
}
