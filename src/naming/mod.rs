//! # Naming Conventions
//!
//! Lexical conventions for property names and the confidence scoring used to
//! pair source keys with destination properties when no directive says how.
//!
//! ```rust
//! use automap_core::naming::ConventionMatcher;
//!
//! let matcher = ConventionMatcher::default();
//! assert_eq!(matcher.confidence("first_name", "firstName"), 1.0);
//! assert_eq!(matcher.confidence("city", "zipCode"), 0.0);
//! ```

pub mod convention;
pub mod conventions;
pub mod matcher;

pub use convention::{split_words, token_similarity, NamingConvention};
pub use conventions::{CamelCase, KebabCase, PascalCase, ScreamingSnakeCase, SnakeCase};
pub use matcher::{default_conventions, ConventionMatcher, NameMatch};
