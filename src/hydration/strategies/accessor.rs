//! Accessor enrichment: computed values exposed through `get`/`is`/`has` methods.
//!
//! Runs after the primary extraction of an object and overwrites colliding keys,
//! so an object surfaces both its state and its computed properties.

use crate::error::HydrationResult;
use crate::hydration::{HydrationContext, Hydrator, HydratorKind};
use crate::input::{Input, RawRecord};

const ACCESSOR_PREFIXES: [&str; 3] = ["get", "is", "has"];

/// Property name behind an accessor: `getFullName` -> `fullName`,
/// `is_active` -> `active`. `None` when the name carries no accessor prefix.
pub fn accessor_property_name(accessor: &str) -> Option<String> {
    for prefix in ACCESSOR_PREFIXES {
        let Some(rest) = accessor.strip_prefix(prefix) else {
            continue;
        };

        if let Some(snake) = rest.strip_prefix('_') {
            if !snake.is_empty() {
                return Some(snake.to_string());
            }
            continue;
        }

        let mut chars = rest.chars();
        if let Some(first) = chars.next().filter(|c| c.is_ascii_uppercase()) {
            return Some(first.to_ascii_lowercase().to_string() + chars.as_str());
        }
    }
    None
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AccessorHydrator;

impl Hydrator for AccessorHydrator {
    fn name(&self) -> &str {
        "AccessorHydrator"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn kind(&self) -> HydratorKind {
        HydratorKind::Enrichment
    }

    fn supports(&self, input: &Input, _destination: &str) -> bool {
        input.as_object().is_some_and(|view| {
            view.accessors()
                .iter()
                .any(|(name, _)| accessor_property_name(name).is_some())
        })
    }

    fn hydrate(
        &self,
        input: &Input,
        destination: &str,
        context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        let mut record = RawRecord::new();
        let Some(view) = input.as_object() else {
            return Ok(record);
        };

        for (accessor, value) in view.accessors() {
            let Some(property) = accessor_property_name(&accessor) else {
                continue;
            };
            if let Some(value) = context.normalize_nested(&property, &value, destination)? {
                record.insert(property, value);
            }
        }
        Ok(record)
    }
}
