//! # Mapping Directives, Storage and Cache
//!
//! ## Architecture
//!
//! ```text
//! Mapping
//! ├── PropertyMapping   (per-property directive, immutable)
//! ├── TypeDescriptor    (destination properties + declared directives)
//! ├── MappingStorage    (explicit directives by source/destination/property)
//! └── MappingCache      (resolved configuration by type pair)
//! ```

pub mod cache;
pub mod descriptor;
pub mod property_mapping;
pub mod storage;

pub use cache::{CacheStats, MappingCache, MappingOrigin, ResolvedConfiguration, ResolvedProperty};
pub use descriptor::{Directive, Mappable, TypeDescriptor, TypeDescriptorBuilder};
pub use property_mapping::{Condition, PropertyMapping};
pub use storage::MappingStorage;

use crate::input::{Input, RawRecord};
use std::fmt;

/// Source type under which directives apply to every source.
pub const WILDCARD_SOURCE: &str = "*";

/// Identifies one resolved configuration: (source type, destination type).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePairKey {
    pub source: String,
    pub destination: String,
}

impl TypePairKey {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for TypePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// The source side of a type pair.
///
/// Objects are identified by their type name. Shapeless inputs (records, JSON,
/// text, scalars) share a kind name for directive lookup, while their cache
/// identity adds the sorted key set, so inference done for one key shape is
/// never replayed against another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceType {
    name: String,
    shape: Option<String>,
}

impl SourceType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: None,
        }
    }

    pub fn of(input: &Input, record: &RawRecord) -> Self {
        match input {
            Input::Object(view) => Self::named(view.type_name()),
            other => Self {
                name: other.kind().to_string(),
                shape: Some(shape_fingerprint(record)),
            },
        }
    }

    /// Name used for directive lookup in storage.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity used as the cache key's source.
    pub fn cache_id(&self) -> String {
        match &self.shape {
            Some(shape) => format!("{}#{}", self.name, shape),
            None => self.name.clone(),
        }
    }
}

fn shape_fingerprint(record: &RawRecord) -> String {
    let mut keys: Vec<&str> = record.keys().map(String::as_str).collect();
    keys.sort_unstable();
    // JSON keeps keys containing separators distinct
    serde_json::Value::from(keys).to_string()
}
