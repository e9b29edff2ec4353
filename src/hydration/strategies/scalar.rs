//! Last-resort strategy for scalars and text that is not a JSON document.

use crate::error::HydrationResult;
use crate::hydration::{HydrationContext, Hydrator};
use crate::input::{Input, RawRecord};
use serde_json::Value;

/// Key under which a scalar input is exposed.
pub const SCALAR_KEY: &str = "value";

#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarFallbackHydrator;

impl Hydrator for ScalarFallbackHydrator {
    fn name(&self) -> &str {
        "ScalarFallbackHydrator"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn supports(&self, input: &Input, _destination: &str) -> bool {
        match input {
            Input::Value(value) => !matches!(value, Value::Array(_) | Value::Object(_)),
            Input::Text(_) => true,
            _ => false,
        }
    }

    fn hydrate(
        &self,
        input: &Input,
        _destination: &str,
        _context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        let mut record = RawRecord::new();
        match input {
            Input::Value(value) => {
                record.insert(SCALAR_KEY.to_string(), value.clone());
            }
            Input::Text(text) => {
                record.insert(SCALAR_KEY.to_string(), Value::String(text.clone()));
            }
            _ => {}
        }
        Ok(record)
    }
}
