use crate::input::RawRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A populated destination instance: its type name plus the properties that
/// received a value, in destination declaration order. Properties left unset
/// are absent rather than `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedObject {
    type_name: String,
    properties: RawRecord,
}

impl MappedObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: RawRecord::new(),
        }
    }

    /// Start from existing property values, e.g. for a partial update.
    pub fn with_properties(type_name: impl Into<String>, properties: RawRecord) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn set(&mut self, property: impl Into<String>, value: Value) {
        self.properties.insert(property.into(), value);
    }

    pub fn remove(&mut self, property: &str) -> Option<Value> {
        self.properties.shift_remove(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties.iter()
    }

    pub fn properties(&self) -> &RawRecord {
        &self.properties
    }

    pub fn into_properties(self) -> RawRecord {
        self.properties
    }

    /// The properties as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.properties.into_iter().collect())
    }
}

impl Serialize for MappedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
