#![allow(clippy::doc_markdown)] // Allow technical terms like RawRecord, PascalCase in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Automap Core
//!
//! Convention-driven object-to-object mapping.
//!
//! ## Overview
//!
//! Automap turns arbitrary inputs (records, JSON values or text, scalars, and
//! Rust objects exposed through [`input::ObjectView`]) into instances of
//! registered destination types. Properties are paired with source keys by
//! explicit directive first, then by naming convention (`first_name` feeds
//! `firstName`), with optional transformers, defaults and conditions per
//! property.
//!
//! ## Architecture
//!
//! ```text
//! Input ──► HydratorFactory ──► RawRecord ──┐
//!            (strategies by priority)       │
//!                                           ▼
//! TypeDescriptor ──► MappingStorage ──► resolution ◄── ConventionMatcher
//!                                           │
//!                                      MappingCache
//!                                           │
//!                                           ▼
//!                        populate (transformers, defaults, conditions)
//!                                           │
//!                                           ▼
//!                                      MappedObject
//! ```
//!
//! ## Module Organization
//!
//! - [`input`] - Input shapes and the `ObjectView` trait
//! - [`hydration`] - Extraction strategies and their priority registry
//! - [`naming`] - Naming conventions and fuzzy name matching
//! - [`mapping`] - Directives, type descriptors, storage and cache
//! - [`transform`] - Value transformers
//! - [`mapper`] - The mapping engine
//! - [`compare`] - Ordering of mapped values
//! - [`config`] - Mapper configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use automap_core::{Input, Mapper, PropertyMapping, TypeDescriptor};
//! use serde_json::json;
//!
//! let mapper = Mapper::new();
//! mapper.register_type(
//!     TypeDescriptor::builder("UserDto")
//!         .properties(["id", "firstName"])
//!         .mapped("name", PropertyMapping::new().from_source("full_name"))
//!         .build(),
//! );
//!
//! let input = Input::text(r#"{"id": 1, "first_name": "Ada", "full_name": "Ada Lovelace"}"#);
//! let user = mapper.map(&input, "UserDto").unwrap();
//! assert_eq!(user.get("firstName"), Some(&json!("Ada")));
//! assert_eq!(user.get("name"), Some(&json!("Ada Lovelace")));
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit, integration and property tests
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod hydration;
pub mod input;
pub mod logging;
pub mod mapper;
pub mod mapping;
pub mod naming;
pub mod transform;

pub use config::MapperConfig;
pub use error::{
    ComparisonError, ConfigurationError, HydrationError, MappingError, MappingResult,
    TransformError,
};
pub use hydration::{Hydrator, HydratorFactory, HydratorKind};
pub use input::{Input, ObjectView, RawRecord};
pub use mapper::{MappedObject, Mapper, MapperBuilder};
pub use mapping::{Condition, Mappable, PropertyMapping, TypeDescriptor};
pub use naming::{ConventionMatcher, NamingConvention};
pub use transform::{TransformContext, ValueTransformer};
