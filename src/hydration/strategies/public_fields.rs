//! Plain objects read through their public fields.

use crate::error::HydrationResult;
use crate::hydration::{HydrationContext, Hydrator};
use crate::input::{Input, RawRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct PublicFieldsHydrator;

impl Hydrator for PublicFieldsHydrator {
    fn name(&self) -> &str {
        "PublicFieldsHydrator"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn supports(&self, input: &Input, _destination: &str) -> bool {
        input
            .as_object()
            .is_some_and(|view| !view.public_fields().is_empty())
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

        for (name, value) in view.public_fields() {
            if let Some(value) = context.normalize_nested(&name, &value, destination)? {
                record.insert(name, value);
            }
        }
        Ok(record)
    }
}
