//! # Type Descriptors
//!
//! The destination side of a mapping: an ordered list of properties plus the
//! directive table declared for them. Descriptors are built once per type,
//! either by hand with the builder or through the `Mappable` trait, and handed
//! to the mapper which feeds the directives into storage.
//!
//! ```rust
//! use automap_core::mapping::{PropertyMapping, TypeDescriptor};
//! use serde_json::json;
//!
//! let descriptor = TypeDescriptor::builder("UserDto")
//!     .property("id")
//!     .mapped("name", PropertyMapping::new().from_source("fullName"))
//!     .mapped("role", PropertyMapping::new().with_default(json!("guest")))
//!     .ignored("passwordHash")
//!     .build();
//!
//! assert_eq!(descriptor.property_names(), vec!["id", "name", "role", "passwordHash"]);
//! assert_eq!(descriptor.directives().len(), 3);
//! ```

use super::property_mapping::PropertyMapping;
use super::WILDCARD_SOURCE;

/// One declared directive: applies to `source_type`, or to every source when wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub source_type: String,
    pub property: String,
    pub mapping: PropertyMapping,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    properties: Vec<String>,
    directives: Vec<Directive>,
}

impl TypeDescriptor {
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            descriptor: TypeDescriptor {
                name: name.into(),
                properties: Vec::new(),
                directives: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(String::as_str).collect()
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p == name)
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

#[derive(Debug, Clone)]
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    fn declare(&mut self, name: &str) {
        if !self.descriptor.has_property(name) {
            self.descriptor.properties.push(name.to_string());
        }
    }

    /// A property filled by convention inference.
    #[must_use]
    pub fn property(mut self, name: &str) -> Self {
        self.declare(name);
        self
    }

    #[must_use]
    pub fn properties<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names {
            self.declare(name);
        }
        self
    }

    /// A property with a directive that applies to every source type.
    #[must_use]
    pub fn mapped(self, name: &str, mapping: PropertyMapping) -> Self {
        self.mapped_from(WILDCARD_SOURCE, name, mapping)
    }

    /// A property with a directive that applies only when mapping from `source_type`.
    #[must_use]
    pub fn mapped_from(mut self, source_type: &str, name: &str, mapping: PropertyMapping) -> Self {
        self.declare(name);
        self.descriptor.directives.push(Directive {
            source_type: source_type.to_string(),
            property: name.to_string(),
            mapping,
        });
        self
    }

    #[must_use]
    pub fn ignored(self, name: &str) -> Self {
        self.mapped(name, PropertyMapping::ignored())
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

/// Rust types that describe their own mapping shape.
///
/// Paired with serde, this lets the mapper produce typed values directly:
/// `mapper.map_into::<UserDto>(&input)`.
pub trait Mappable {
    fn descriptor() -> TypeDescriptor;
}
