//! # Built-in Extraction Strategies
//!
//! ## Strategy Priority Order
//!
//! Strategies are tried in priority order (higher number = checked first):
//!
//! | Priority | Strategy | Description |
//! |----------|----------|-------------|
//! | 100 | `StructuredObjectHydrator` | Objects that render themselves as a record |
//! | 90 | `JsonTextHydrator` | Text holding a JSON object |
//! | 80 | `RecordHydrator` | Records and decoded JSON objects |
//! | 50 | `PublicFieldsHydrator` | Plain object state |
//! | 40 | `AccessorHydrator` | Accessor enrichment (`getX`, `isX`, `hasX`) |
//! | 0 | `ScalarFallbackHydrator` | Scalars and plain text as `{"value": ...}` |
//!
//! ## Custom Strategies
//!
//! ```rust
//! use automap_core::error::HydrationResult;
//! use automap_core::hydration::{HydrationContext, Hydrator, HydratorFactory};
//! use automap_core::input::{Input, RawRecord};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct CsvLineHydrator;
//!
//! impl Hydrator for CsvLineHydrator {
//!     fn name(&self) -> &str { "CsvLineHydrator" }
//!     fn priority(&self) -> i32 { 95 }
//!     fn supports(&self, input: &Input, _destination: &str) -> bool {
//!         matches!(input, Input::Text(text) if text.contains(','))
//!     }
//!     fn hydrate(
//!         &self,
//!         input: &Input,
//!         _destination: &str,
//!         _context: &HydrationContext<'_>,
//!     ) -> HydrationResult<RawRecord> {
//!         let mut record = RawRecord::new();
//!         if let Input::Text(text) = input {
//!             for (i, column) in text.split(',').enumerate() {
//!                 record.insert(format!("col{i}"), column.trim().into());
//!             }
//!         }
//!         Ok(record)
//!     }
//! }
//!
//! let factory = HydratorFactory::with_defaults();
//! factory.register(Arc::new(CsvLineHydrator));
//! let record = factory.extract(&Input::text("a, b"), "Row").unwrap();
//! assert_eq!(record["col1"], "b");
//! ```

mod accessor;
mod json_text;
mod public_fields;
mod record;
mod scalar;
mod structured;

pub use accessor::{accessor_property_name, AccessorHydrator};
pub use json_text::JsonTextHydrator;
pub use public_fields::PublicFieldsHydrator;
pub use record::RecordHydrator;
pub use scalar::{ScalarFallbackHydrator, SCALAR_KEY};
pub use structured::StructuredObjectHydrator;

use super::hydrator::Hydrator;
use std::sync::Arc;

/// The built-in strategy table, in registration order.
pub fn default_hydrators() -> Vec<Arc<dyn Hydrator>> {
    vec![
        Arc::new(StructuredObjectHydrator),
        Arc::new(JsonTextHydrator),
        Arc::new(RecordHydrator),
        Arc::new(PublicFieldsHydrator),
        Arc::new(AccessorHydrator),
        Arc::new(ScalarFallbackHydrator),
    ]
}
