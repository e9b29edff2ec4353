//! Encoded text documents holding a JSON object.

use crate::error::HydrationResult;
use crate::hydration::{HydrationContext, Hydrator};
use crate::input::{record_from_map, Input, RawRecord};
use serde_json::Value;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTextHydrator;

impl JsonTextHydrator {
    fn parse(input: &Input) -> Option<serde_json::Map<String, Value>> {
        let Input::Text(text) = input else {
            return None;
        };
        if !text.trim_start().starts_with('{') {
            return None;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl Hydrator for JsonTextHydrator {
    fn name(&self) -> &str {
        "JsonTextHydrator"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn supports(&self, input: &Input, _destination: &str) -> bool {
        Self::parse(input).is_some()
    }

    fn hydrate(
        &self,
        input: &Input,
        _destination: &str,
        _context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        Ok(Self::parse(input)
            .map(|map| record_from_map(&map))
            .unwrap_or_default())
    }
}
