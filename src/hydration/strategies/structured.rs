//! Self-describing objects: anything whose `describe()` renders a record.

use crate::error::HydrationResult;
use crate::hydration::{HydrationContext, Hydrator};
use crate::input::{Input, RawRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredObjectHydrator;

impl Hydrator for StructuredObjectHydrator {
    fn name(&self) -> &str {
        "StructuredObjectHydrator"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn supports(&self, input: &Input, _destination: &str) -> bool {
        input
            .as_object()
            .is_some_and(|view| view.describe().is_some())
    }

    fn hydrate(
        &self,
        input: &Input,
        _destination: &str,
        _context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        Ok(input
            .as_object()
            .and_then(|view| view.describe())
            .unwrap_or_default())
    }
}
