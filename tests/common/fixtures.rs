use automap_core::input::{Input, ObjectView, RawRecord};
use automap_core::mapping::{Mappable, PropertyMapping, TypeDescriptor};
use automap_core::Mapper;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Object with plain state and one computed accessor.
#[derive(Debug, Clone)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
}

impl ObjectView for Person {
    fn type_name(&self) -> &str {
        "Person"
    }

    fn public_fields(&self) -> Vec<(String, Input)> {
        vec![
            ("first_name".to_string(), json!(self.first_name).into()),
            ("last_name".to_string(), json!(self.last_name).into()),
        ]
    }

    fn accessors(&self) -> Vec<(String, Input)> {
        vec![
            (
                "getFullName".to_string(),
                json!(format!("{} {}", self.first_name, self.last_name)).into(),
            ),
            ("isActive".to_string(), json!(self.active).into()),
        ]
    }
}

pub fn ada() -> Person {
    Person {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        active: true,
    }
}

/// Public field `a` plus accessor `getB`.
#[derive(Debug)]
pub struct FieldsAndAccessor;

impl ObjectView for FieldsAndAccessor {
    fn type_name(&self) -> &str {
        "FieldsAndAccessor"
    }

    fn public_fields(&self) -> Vec<(String, Input)> {
        vec![("a".to_string(), json!(1).into())]
    }

    fn accessors(&self) -> Vec<(String, Input)> {
        vec![("getB".to_string(), json!(2).into())]
    }
}

/// Object that renders itself as a record.
#[derive(Debug)]
pub struct Invoice {
    pub number: String,
    pub amount_cents: i64,
}

impl ObjectView for Invoice {
    fn type_name(&self) -> &str {
        "Invoice"
    }

    fn describe(&self) -> Option<RawRecord> {
        let mut record = RawRecord::new();
        record.insert("invoice_number".to_string(), json!(self.number));
        record.insert("amount_cents".to_string(), json!(self.amount_cents));
        Some(record)
    }
}

/// A record tagged with a type name, standing in for a typed source object.
#[derive(Debug, Clone)]
pub struct TypedRecord {
    pub type_name: String,
    pub record: RawRecord,
}

impl TypedRecord {
    pub fn new(type_name: &str, value: Value) -> Self {
        let record = value
            .as_object()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Self {
            type_name: type_name.to_string(),
            record,
        }
    }
}

impl ObjectView for TypedRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn describe(&self) -> Option<RawRecord> {
        Some(self.record.clone())
    }
}

/// Linked node whose `next` can point back at itself.
#[derive(Debug, Default)]
pub struct Node {
    pub label: String,
    pub next: Mutex<Option<Arc<Node>>>,
}

impl ObjectView for Node {
    fn type_name(&self) -> &str {
        "Node"
    }

    fn public_fields(&self) -> Vec<(String, Input)> {
        let mut fields = vec![("label".to_string(), json!(self.label).into())];
        if let Some(next) = self.next.lock().clone() {
            let next: Arc<dyn ObjectView> = next;
            fields.push(("next".to_string(), Input::Object(next)));
        }
        fields
    }
}

pub fn cyclic_node() -> Arc<Node> {
    let node = Arc::new(Node {
        label: "loop".to_string(),
        next: Mutex::new(None),
    });
    *node.next.lock() = Some(Arc::clone(&node));
    node
}

pub fn person_dto() -> TypeDescriptor {
    TypeDescriptor::builder("PersonDto")
        .properties(["firstName", "lastName", "fullName", "active"])
        .mapped("nickname", PropertyMapping::new().with_default(json!("unknown")))
        .build()
}

pub fn item() -> TypeDescriptor {
    TypeDescriptor::builder("Item").property("id").build()
}

/// Typed destination mapped through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub verified: bool,
}

impl Mappable for Contact {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("Contact")
            .properties(["email", "displayName"])
            .mapped("verified", PropertyMapping::new().with_default(json!(false)))
            .build()
    }
}

pub fn mapper_with(types: impl IntoIterator<Item = TypeDescriptor>) -> Mapper {
    let mapper = Mapper::new();
    for descriptor in types {
        mapper.register_type(descriptor);
    }
    mapper
}

pub fn json_input(value: Value) -> Input {
    Input::from(value)
}
