//! Generic associative input.

use crate::error::HydrationResult;
use crate::hydration::{HydrationContext, Hydrator};
use crate::input::{record_from_map, Input, RawRecord};
use serde_json::Value;

#[derive(Debug, Default, Clone, Copy)]
pub struct RecordHydrator;

impl Hydrator for RecordHydrator {
    fn name(&self) -> &str {
        "RecordHydrator"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn supports(&self, input: &Input, _destination: &str) -> bool {
        matches!(input, Input::Record(_) | Input::Value(Value::Object(_)))
    }

    fn hydrate(
        &self,
        input: &Input,
        _destination: &str,
        _context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        Ok(match input {
            Input::Record(record) => record.clone(),
            Input::Value(Value::Object(map)) => record_from_map(map),
            _ => RawRecord::new(),
        })
    }
}
