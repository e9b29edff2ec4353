//! Registered destination types.

use crate::mapping::TypeDescriptor;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Destination types the mapper can construct, by name.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl TypeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a descriptor. Returns the replaced one, if any.
    pub fn register(&self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        let name = descriptor.name().to_string();
        debug!(type_name = %name, properties = descriptor.properties().len(), "Registering destination type");
        self.types.write().insert(name, Arc::new(descriptor))
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.read().get(type_name).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.read().contains_key(type_name)
    }

    /// Sorted type names.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    pub fn clear(&self) {
        self.types.write().clear();
    }
}
