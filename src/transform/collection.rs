//! Per-element mapping of collection properties.

use super::transformer::{TransformContext, ValueTransformer};
use crate::error::{MappingError, TransformError};
use crate::input::{value_kind, Input};
use serde_json::{Map, Value};
use tracing::trace;

/// Maps every element of an array (or every value of an object) into
/// `item_type` through the mapper, one level deeper than the owning property.
///
/// With `preserve_keys`, an object stays an object keyed as before; otherwise its
/// values become an array. With `deep`, elements that are themselves arrays are
/// walked recursively instead of being mapped as a single element.
#[derive(Debug, Clone)]
pub struct CollectionTransformer {
    item_type: String,
    preserve_keys: bool,
    deep: bool,
    name: String,
}

impl CollectionTransformer {
    pub fn new(item_type: impl Into<String>) -> Self {
        let item_type = item_type.into();
        Self {
            name: format!("collection<{item_type}>"),
            item_type,
            preserve_keys: false,
            deep: false,
        }
    }

    #[must_use]
    pub fn preserve_keys(mut self) -> Self {
        self.preserve_keys = true;
        self
    }

    #[must_use]
    pub fn deep(mut self) -> Self {
        self.deep = true;
        self
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    fn map_element(
        &self,
        element: Value,
        index: String,
        level: usize,
        context: &TransformContext<'_>,
    ) -> Result<Value, TransformError> {
        if self.deep {
            if let Value::Array(items) = element {
                let nested_depth = context.depth() + 2 + level;
                let max_depth = context.mapper().config().max_depth;
                if nested_depth > max_depth {
                    return Err(TransformError::Element {
                        index,
                        cause: Box::new(MappingError::CyclicGraphDetected {
                            type_name: self.item_type.clone(),
                            depth: nested_depth,
                            max_depth,
                        }),
                    });
                }
                trace!(index = %index, level, "Descending into nested collection");
                return self.map_array(items, &index, level + 1, context);
            }
        }

        let depth = context.depth() + 1 + level;
        context
            .mapper()
            .map_at_depth(&Input::Value(element), &self.item_type, depth)
            .map(|mapped| mapped.into_value())
            .map_err(|cause| TransformError::Element {
                index,
                cause: Box::new(cause),
            })
    }

    fn map_array(
        &self,
        items: Vec<Value>,
        prefix: &str,
        level: usize,
        context: &TransformContext<'_>,
    ) -> Result<Value, TransformError> {
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| self.map_element(item, element_index(prefix, &i.to_string()), level, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

fn element_index(prefix: &str, index: &str) -> String {
    if prefix.is_empty() {
        index.to_string()
    } else {
        format!("{prefix}.{index}")
    }
}

impl ValueTransformer for CollectionTransformer {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, value: Value, context: &TransformContext<'_>) -> Result<Value, TransformError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => self.map_array(items, "", 0, context),
            Value::Object(entries) if self.preserve_keys => {
                let mut mapped = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    let value = self.map_element(item, key.clone(), 0, context)?;
                    mapped.insert(key, value);
                }
                Ok(Value::Object(mapped))
            }
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, item)| self.map_element(item, key, 0, context))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(TransformError::UnexpectedKind {
                expected: "array or object collection".to_string(),
                actual_kind: value_kind(&other).to_string(),
            }),
        }
    }
}
