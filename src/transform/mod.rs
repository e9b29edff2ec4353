//! # Value Transformers
//!
//! Single-value transforms applied to a property's raw value after it has
//! been read from the source record. Transformers see the full record and can
//! call back into the mapper for nested values through `TransformContext`.
//!
//! | Transformer | Purpose | Inverse |
//! |-------------|---------|---------|
//! | `FnTransformer` | Closure, errors through `anyhow` | optional, supplied by caller |
//! | `CastTransformer` | Scalar kind casts | none |
//! | `DateTimeTransformer` | Parse and reformat timestamps | formats swapped |
//! | `CollectionTransformer` | Map every element into an item type | none |

mod cast;
mod collection;
mod datetime;
mod transformer;

pub use cast::{CastTarget, CastTransformer};
pub use collection::CollectionTransformer;
pub use datetime::DateTimeTransformer;
pub use transformer::{FnTransformer, TransformContext, ValueTransformer};
