//! # Mapping Inputs
//!
//! The closed set of input shapes the extraction strategies understand, and the
//! `ObjectView` trait through which arbitrary Rust objects expose their state.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Normalized key-value view of any input. Later writes overwrite earlier ones.
pub type RawRecord = IndexMap<String, Value>;

/// Read-only view of an object's state, the Rust stand-in for runtime reflection.
///
/// Implementors expose whichever surfaces they have:
/// - `describe()` for self-describing objects that can render themselves as a record
/// - `public_fields()` for plain state
/// - `accessors()` for computed values, named with a `get`/`is`/`has` prefix
///   (`getFullName`, `isActive`, `get_total`)
pub trait ObjectView: Send + Sync + fmt::Debug {
    /// Stable type identifier, used as the source type of a mapping.
    fn type_name(&self) -> &str;

    fn describe(&self) -> Option<RawRecord> {
        None
    }

    fn public_fields(&self) -> Vec<(String, Input)> {
        Vec::new()
    }

    fn accessors(&self) -> Vec<(String, Input)> {
        Vec::new()
    }
}

/// Anything the mapper can be asked to map from.
#[derive(Debug, Clone)]
pub enum Input {
    /// Associative input built in Rust.
    Record(RawRecord),
    /// A decoded JSON value. Objects are associative, scalars hit the fallback.
    Value(Value),
    /// Encoded text, usually a JSON document.
    Text(String),
    Object(Arc<dyn ObjectView>),
    /// Opaque handle (file descriptor, socket, ...) with no extractable state.
    Resource { kind: String },
}

impl Input {
    pub fn object(view: impl ObjectView + 'static) -> Self {
        Input::Object(Arc::new(view))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    pub fn resource(kind: impl Into<String>) -> Self {
        Input::Resource { kind: kind.into() }
    }

    /// Coarse input kind used in errors and source type identifiers.
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Record(_) => "record",
            Input::Value(Value::Object(_)) => "json",
            Input::Value(_) => "scalar",
            Input::Text(_) => "text",
            Input::Object(_) => "object",
            Input::Resource { .. } => "resource",
        }
    }

    /// Object type name for objects, the kind for everything else.
    pub fn type_label(&self) -> String {
        match self {
            Input::Object(view) => view.type_name().to_string(),
            Input::Resource { kind } => format!("resource:{kind}"),
            other => other.kind().to_string(),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Input::Object(_))
    }

    pub fn as_object(&self) -> Option<&Arc<dyn ObjectView>> {
        match self {
            Input::Object(view) => Some(view),
            _ => None,
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

impl From<RawRecord> for Input {
    fn from(record: RawRecord) -> Self {
        Input::Record(record)
    }
}

impl From<Arc<dyn ObjectView>> for Input {
    fn from(view: Arc<dyn ObjectView>) -> Self {
        Input::Object(view)
    }
}

/// Runtime kind of a JSON value, for error context.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collect a JSON object into a `RawRecord`, keeping key order.
pub fn record_from_map(map: &serde_json::Map<String, Value>) -> RawRecord {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

pub fn record_to_value(record: RawRecord) -> Value {
    Value::Object(record.into_iter().collect())
}
