//! # Property Mapping Directive
//!
//! The per-property decision of how a destination property is populated:
//! which source key feeds it, through which transformer, with which default,
//! under which condition, or whether it is skipped entirely.
//!
//! ```rust
//! use automap_core::mapping::{Condition, PropertyMapping};
//! use serde_json::json;
//!
//! let mapping = PropertyMapping::new()
//!     .from_source("fullName")
//!     .with_default(json!("unknown"))
//!     .when(Condition::key_present("fullName"));
//!
//! assert_eq!(mapping.source_key(), Some("fullName"));
//! assert!(!mapping.is_ignored());
//! ```

use crate::input::RawRecord;
use crate::transform::ValueTransformer;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(&RawRecord) -> bool + Send + Sync;

/// Predicate over the full source record deciding whether a property maps.
#[derive(Clone)]
pub struct Condition {
    name: String,
    predicate: Arc<Predicate>,
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition({})", self.name)
    }
}

impl Condition {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&RawRecord) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// True when the record holds a non-null value under `key`.
    pub fn key_present(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(format!("present({key})"), move |record| {
            record.get(&key).is_some_and(|v| !v.is_null())
        })
    }

    /// True when the record holds exactly `expected` under `key`.
    pub fn equals(key: impl Into<String>, expected: Value) -> Self {
        let key = key.into();
        Self::new(format!("{key} == {expected}"), move |record| {
            record.get(&key) == Some(&expected)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, record: &RawRecord) -> bool {
        (self.predicate)(record)
    }

    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

/// How one destination property is populated. Immutable once built.
#[derive(Clone, Default)]
pub struct PropertyMapping {
    source_key: Option<String>,
    transformer: Option<Arc<dyn ValueTransformer>>,
    default_value: Option<Value>,
    condition: Option<Condition>,
    ignored: bool,
    bidirectional_partner: Option<String>,
}

impl fmt::Debug for PropertyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMapping")
            .field("source_key", &self.source_key)
            .field("transformer", &self.transformer.as_ref().map(|t| t.name()))
            .field("default_value", &self.default_value)
            .field("condition", &self.condition)
            .field("ignored", &self.ignored)
            .field("bidirectional_partner", &self.bidirectional_partner)
            .finish()
    }
}

impl PartialEq for PropertyMapping {
    fn eq(&self, other: &Self) -> bool {
        let same_transformer = match (&self.transformer, &other.transformer) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        let same_condition = match (&self.condition, &other.condition) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        };

        same_transformer
            && same_condition
            && self.source_key == other.source_key
            && self.default_value == other.default_value
            && self.ignored == other.ignored
            && self.bidirectional_partner == other.bidirectional_partner
    }
}

impl PropertyMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A directive that skips the property.
    #[must_use]
    pub fn ignored() -> Self {
        Self {
            ignored: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_source(mut self, key: impl Into<String>) -> Self {
        self.source_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: Arc<dyn ValueTransformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Pair this property with `partner` on the other type of the mapping.
    ///
    /// Without an explicit source key the partner doubles as the source key.
    #[must_use]
    pub fn bidirectional(mut self, partner: impl Into<String>) -> Self {
        self.bidirectional_partner = Some(partner.into());
        self
    }

    pub fn source_key(&self) -> Option<&str> {
        self.source_key.as_deref()
    }

    pub fn transformer(&self) -> Option<&Arc<dyn ValueTransformer>> {
        self.transformer.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn bidirectional_partner(&self) -> Option<&str> {
        self.bidirectional_partner.as_deref()
    }

    /// Source key to read: the explicit key, else the bidirectional partner.
    pub fn effective_source_key(&self) -> Option<&str> {
        self.source_key().or(self.bidirectional_partner())
    }

    /// The mirrored directive for the opposite direction, keyed by the partner
    /// property. `None` unless a partner is declared.
    ///
    /// The mirror reads from `property`, keeps the condition, and uses the
    /// transformer's inverse when it offers one.
    pub fn inverse(&self, property: &str) -> Option<(String, PropertyMapping)> {
        let partner = self.bidirectional_partner.as_ref()?;
        let mirrored = PropertyMapping {
            source_key: Some(property.to_string()),
            transformer: self.transformer.as_ref().and_then(|t| t.inverse()),
            default_value: None,
            condition: self.condition.clone(),
            ignored: self.ignored,
            bidirectional_partner: Some(property.to_string()),
        };
        Some((partner.clone(), mirrored))
    }

    /// Same directive with `source_key` filled in by convention inference.
    pub(crate) fn with_inferred_source(&self, key: &str) -> Self {
        let mut resolved = self.clone();
        resolved.source_key = Some(key.to_string());
        resolved
    }
}
