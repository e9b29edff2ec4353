//! Value transformer contract and the closure-backed transformer.

use crate::error::{MappingResult, TransformError};
use crate::input::{Input, RawRecord};
use crate::mapper::{MappedObject, Mapper};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What a transformer sees besides the value itself.
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
    record: &'a RawRecord,
    destination: &'a str,
    property: &'a str,
    mapper: &'a Mapper,
    depth: usize,
}

impl fmt::Debug for TransformContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformContext")
            .field("destination", &self.destination)
            .field("property", &self.property)
            .field("depth", &self.depth)
            .field("record_keys", &self.record.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> TransformContext<'a> {
    pub(crate) fn new(
        record: &'a RawRecord,
        destination: &'a str,
        property: &'a str,
        mapper: &'a Mapper,
        depth: usize,
    ) -> Self {
        Self {
            record,
            destination,
            property,
            mapper,
            depth,
        }
    }

    /// The full normalized source record.
    pub fn record(&self) -> &RawRecord {
        self.record
    }

    pub fn destination(&self) -> &str {
        self.destination
    }

    pub fn property(&self) -> &str {
        self.property
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn mapper(&self) -> &Mapper {
        self.mapper
    }

    /// Map a nested value into `item_type` one level deeper.
    pub fn map_nested(&self, input: &Input, item_type: &str) -> MappingResult<MappedObject> {
        self.mapper.map_at_depth(input, item_type, self.depth + 1)
    }
}

/// Pluggable single-value transform. Failures are wrapped by the mapper with
/// the property and transformer names, never swallowed.
pub trait ValueTransformer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn transform(&self, value: Value, context: &TransformContext<'_>) -> Result<Value, TransformError>;

    /// Transformer for the mirrored direction of a bidirectional directive.
    fn inverse(&self) -> Option<Arc<dyn ValueTransformer>> {
        None
    }
}

type TransformFn = dyn Fn(Value, &TransformContext<'_>) -> anyhow::Result<Value> + Send + Sync;

/// Transformer backed by a closure.
///
/// ```rust
/// use automap_core::transform::FnTransformer;
/// use serde_json::Value;
///
/// let upper = FnTransformer::new("uppercase", |value, _ctx| {
///     let text = value.as_str().ok_or_else(|| anyhow::anyhow!("not a string"))?;
///     Ok(Value::String(text.to_uppercase()))
/// });
/// # let _ = upper;
/// ```
#[derive(Clone)]
pub struct FnTransformer {
    name: String,
    transform: Arc<TransformFn>,
    inverse: Option<Arc<dyn ValueTransformer>>,
}

impl fmt::Debug for FnTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransformer")
            .field("name", &self.name)
            .field("has_inverse", &self.inverse.is_some())
            .finish()
    }
}

impl FnTransformer {
    pub fn new(
        name: impl Into<String>,
        transform: impl Fn(Value, &TransformContext<'_>) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
            inverse: None,
        }
    }

    #[must_use]
    pub fn with_inverse(mut self, inverse: Arc<dyn ValueTransformer>) -> Self {
        self.inverse = Some(inverse);
        self
    }
}

impl ValueTransformer for FnTransformer {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, value: Value, context: &TransformContext<'_>) -> Result<Value, TransformError> {
        (self.transform)(value, context).map_err(TransformError::Custom)
    }

    fn inverse(&self) -> Option<Arc<dyn ValueTransformer>> {
        self.inverse.clone()
    }
}
