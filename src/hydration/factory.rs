//! # Hydrator Factory
//!
//! Priority-ordered registry of extraction strategies.
//!
//! ## Resolution Flow
//!
//! ```text
//! Input ───────────┐
//!                  │
//!             ┌────▼────┐
//!     object? │ Check   │  no
//!   ┌─────────┤ Kind    ├───────────┐
//!   │         └─────────┘           │
//!   │                               │
//! ┌─▼──────────────────┐   ┌────────▼──────────┐
//! │ Chain: first       │   │ First strategy    │
//! │ structural match,  │   │ whose supports()  │
//! │ then every         │   │ is true           │
//! │ enrichment merged  │   └───────────────────┘
//! └────────────────────┘
//! ```
//!
//! Registration marks the table unsorted; the next read sorts it (stable, so
//! equal priorities keep registration order).

use super::hydrator::{HydrationContext, Hydrator, HydratorKind};
use super::strategies::default_hydrators;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{HydrationError, HydrationResult};
use crate::input::{Input, RawRecord};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Default)]
struct Registered {
    hydrators: Vec<Arc<dyn Hydrator>>,
    sorted: bool,
}

/// Registry of extraction strategies shared by every mapping call.
pub struct HydratorFactory {
    registered: RwLock<Registered>,
}

impl fmt::Debug for HydratorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered = self.registered.read();
        f.debug_struct("HydratorFactory")
            .field(
                "hydrators",
                &registered
                    .hydrators
                    .iter()
                    .map(|h| h.name().to_string())
                    .collect::<Vec<_>>(),
            )
            .field("sorted", &registered.sorted)
            .finish()
    }
}

impl Default for HydratorFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HydratorFactory {
    /// Create a factory with no strategies.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            registered: RwLock::new(Registered {
                hydrators: Vec::new(),
                sorted: true,
            }),
        }
    }

    /// Create a factory holding the built-in strategies.
    #[must_use]
    pub fn with_defaults() -> Self {
        let factory = Self::empty();
        for hydrator in default_hydrators() {
            factory.register(hydrator);
        }
        factory
    }

    /// Builder-style registration.
    #[must_use]
    pub fn with_hydrator(self, hydrator: Arc<dyn Hydrator>) -> Self {
        self.register(hydrator);
        self
    }

    pub fn register(&self, hydrator: Arc<dyn Hydrator>) {
        debug!(
            hydrator = hydrator.name(),
            priority = hydrator.priority(),
            "Registering extraction strategy"
        );
        let mut registered = self.registered.write();
        registered.hydrators.push(hydrator);
        registered.sorted = false;
    }

    /// Drop custom strategies and restore the built-in table.
    pub fn reset_to_defaults(&self) {
        let mut registered = self.registered.write();
        registered.hydrators = default_hydrators();
        registered.sorted = false;
        debug!("Extraction strategies reset to defaults");
    }

    /// Strategies in resolution order, sorting first if a registration is pending.
    fn ordered(&self) -> Vec<Arc<dyn Hydrator>> {
        {
            let registered = self.registered.read();
            if registered.sorted {
                return registered.hydrators.clone();
            }
        }

        let mut registered = self.registered.write();
        if !registered.sorted {
            registered
                .hydrators
                .sort_by_key(|h| std::cmp::Reverse(h.priority()));
            registered.sorted = true;
        }
        registered.hydrators.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.read().hydrators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.read().hydrators.is_empty()
    }

    /// Strategy names in priority order.
    #[must_use]
    pub fn hydrator_names(&self) -> Vec<String> {
        self.ordered()
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    #[must_use]
    pub fn has_hydrator(&self, name: &str) -> bool {
        self.registered
            .read()
            .hydrators
            .iter()
            .any(|h| h.name() == name)
    }

    /// First strategy that supports the input, if any.
    pub fn resolve(&self, input: &Input, destination: &str) -> Option<Arc<dyn Hydrator>> {
        self.ordered()
            .into_iter()
            .find(|h| h.supports(input, destination))
    }

    /// Normalize an input into a `RawRecord`.
    pub fn extract(&self, input: &Input, destination: &str) -> HydrationResult<RawRecord> {
        self.extract_at(input, destination, 0, DEFAULT_MAX_DEPTH)
    }

    /// Normalize an input found `depth` levels below the top-level source.
    pub fn extract_at(
        &self,
        input: &Input,
        destination: &str,
        depth: usize,
        max_depth: usize,
    ) -> HydrationResult<RawRecord> {
        if depth > max_depth {
            return Err(HydrationError::CyclicGraphDetected {
                type_name: input.type_label(),
                depth,
                max_depth,
            });
        }

        let context = HydrationContext::new(self, depth, max_depth);
        if input.is_object() {
            self.extract_object(input, destination, &context)
        } else {
            self.extract_single(input, destination, &context)
        }
    }

    fn extract_single(
        &self,
        input: &Input,
        destination: &str,
        context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        let Some(hydrator) = self.resolve(input, destination) else {
            return Err(self.unsupported(input, destination, Vec::new()));
        };

        trace!(
            hydrator = hydrator.name(),
            input_kind = input.kind(),
            "Extracting with single strategy"
        );
        hydrator.hydrate(input, destination, context)
    }

    fn extract_object(
        &self,
        input: &Input,
        destination: &str,
        context: &HydrationContext<'_>,
    ) -> HydrationResult<RawRecord> {
        let mut primary: Option<RawRecord> = None;
        let mut enrichments = Vec::new();
        let mut tried = Vec::new();

        for hydrator in self.ordered() {
            if !hydrator.supports(input, destination) {
                trace!(
                    hydrator = hydrator.name(),
                    "Strategy does not support this object"
                );
                continue;
            }
            tried.push(hydrator.name().to_string());

            match hydrator.kind() {
                HydratorKind::Structural if primary.is_none() => {
                    trace!(hydrator = hydrator.name(), "Primary extraction");
                    primary = Some(hydrator.hydrate(input, destination, context)?);
                }
                HydratorKind::Structural => {
                    trace!(
                        hydrator = hydrator.name(),
                        "Primary extraction already chosen, skipping"
                    );
                }
                HydratorKind::Enrichment => enrichments.push(hydrator),
            }
        }

        if primary.is_none() && enrichments.is_empty() {
            return Err(self.unsupported(input, destination, tried));
        }

        let mut record = primary.unwrap_or_default();
        for hydrator in enrichments {
            trace!(hydrator = hydrator.name(), "Merging enrichment");
            record.extend(hydrator.hydrate(input, destination, context)?);
        }
        Ok(record)
    }

    fn unsupported(&self, input: &Input, destination: &str, tried: Vec<String>) -> HydrationError {
        debug!(
            input_kind = input.kind(),
            destination, "No extraction strategy supports input"
        );
        HydrationError::UnsupportedInputKind {
            input_kind: input.type_label(),
            destination: destination.to_string(),
            tried,
        }
    }

    /// Get statistics about the registered strategies.
    #[must_use]
    pub fn stats(&self) -> HydratorFactoryStats {
        let ordered = self.ordered();
        HydratorFactoryStats {
            hydrator_count: ordered.len(),
            hydrator_names: ordered.iter().map(|h| h.name().to_string()).collect(),
            priorities: ordered.iter().map(|h| h.priority()).collect(),
        }
    }
}

/// Statistics about a hydrator factory.
#[derive(Debug, Clone)]
pub struct HydratorFactoryStats {
    /// Number of registered strategies
    pub hydrator_count: usize,

    /// Names of strategies in priority order
    pub hydrator_names: Vec<String>,

    /// Priorities of strategies in order
    pub priorities: Vec<i32>,
}
