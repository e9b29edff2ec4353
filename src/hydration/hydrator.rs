//! # Extraction Strategy
//!
//! One normalization policy turning an `Input` into a `RawRecord`.
//!
//! ## Strategy Responsibilities
//!
//! - **DO**: Keep `supports()` a pure predicate
//! - **DO**: Make `hydrate()` total over every input `supports()` accepted
//! - **DO**: Omit a key whose nested value cannot be extracted
//! - **DON'T**: Look at other strategies; ordering and merging belong to the factory
//!
//! ## Priority System
//!
//! Strategies are tried in priority order (higher = checked first):
//! - 100: StructuredObjectHydrator (self-describing objects)
//! - 90: JsonTextHydrator (encoded documents)
//! - 80: RecordHydrator (associative input)
//! - 50: PublicFieldsHydrator (plain object state)
//! - 40: AccessorHydrator (enrichment from accessors)
//! - 0: ScalarFallbackHydrator (last resort)

use super::factory::HydratorFactory;
use crate::error::{HydrationError, HydrationResult};
use crate::input::{record_to_value, Input, RawRecord};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Role of a strategy inside the object chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydratorKind {
    /// Produces the primary record; only the first matching one runs.
    Structural,
    /// Runs after the primary extraction and overwrites colliding keys.
    Enrichment,
}

/// Strategy trait for normalizing one input shape.
pub trait Hydrator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn priority(&self) -> i32;

    fn kind(&self) -> HydratorKind {
        HydratorKind::Structural
    }

    fn supports(&self, input: &Input, destination: &str) -> bool;

    fn hydrate(
        &self,
        input: &Input,
        destination: &str,
        context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord>;
}

/// Per-call state handed to strategies: the current depth and a way to
/// normalize nested objects through the same registry.
#[derive(Debug, Clone, Copy)]
pub struct HydrationContext<'a> {
    factory: &'a HydratorFactory,
    depth: usize,
    max_depth: usize,
}

impl<'a> HydrationContext<'a> {
    pub(crate) fn new(factory: &'a HydratorFactory, depth: usize, max_depth: usize) -> Self {
        Self {
            factory,
            depth,
            max_depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Turn a nested input into a plain value.
    ///
    /// Returns `Ok(None)` when the value cannot be extracted and should be
    /// omitted. Only a tripped depth limit is an error.
    pub fn normalize_nested(
        &self,
        key: &str,
        input: &Input,
        destination: &str,
    ) -> HydrationResult<Option<Value>> {
        match input {
            Input::Value(value) => Ok(Some(value.clone())),
            Input::Text(text) => Ok(Some(Value::String(text.clone()))),
            Input::Record(record) => Ok(Some(record_to_value(record.clone()))),
            Input::Resource { kind } => {
                debug!(key, kind = %kind, "Omitting resource handle from record");
                Ok(None)
            }
            Input::Object(_) => {
                match self
                    .factory
                    .extract_at(input, destination, self.depth + 1, self.max_depth)
                {
                    Ok(record) => Ok(Some(record_to_value(record))),
                    Err(cyclic @ HydrationError::CyclicGraphDetected { .. }) => Err(cyclic),
                    Err(error) => {
                        warn!(key, error = %error, "Omitting nested value that could not be extracted");
                        Ok(None)
                    }
                }
            }
        }
    }
}
