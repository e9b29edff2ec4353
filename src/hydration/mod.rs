//! # Extraction
//!
//! Normalizes arbitrary input into a `RawRecord` through a priority-ordered set
//! of strategies.
//!
//! ## Architecture
//!
//! ```text
//! Extraction
//! ├── Hydrator          (one normalization policy)
//! ├── HydratorFactory   (priority ordering, object chain, reset)
//! └── strategies/
//!     ├── StructuredObjectHydrator  (100)
//!     ├── JsonTextHydrator          (90)
//!     ├── RecordHydrator            (80)
//!     ├── PublicFieldsHydrator      (50)
//!     ├── AccessorHydrator          (40, enrichment)
//!     └── ScalarFallbackHydrator    (0)
//! ```

pub mod factory;
pub mod hydrator;
pub mod strategies;

pub use factory::{HydratorFactory, HydratorFactoryStats};
pub use hydrator::{HydrationContext, Hydrator, HydratorKind};
