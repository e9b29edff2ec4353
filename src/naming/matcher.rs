//! # Convention Matcher
//!
//! Convention-aware fuzzy matching of property names.
//!
//! Each name is read through the first registered convention that recognizes
//! it, so `first_name` and `firstName` meet in the same canonical form. Names no
//! convention recognizes fall back to a generic separator/case splitter.

use super::convention::{split_words, token_similarity, NamingConvention};
use super::conventions::{CamelCase, KebabCase, PascalCase, ScreamingSnakeCase, SnakeCase};
use crate::config::DEFAULT_MIN_CONFIDENCE;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The built-in conventions, in detection order.
pub fn default_conventions() -> Vec<Arc<dyn NamingConvention>> {
    vec![
        Arc::new(SnakeCase),
        Arc::new(KebabCase),
        Arc::new(ScreamingSnakeCase),
        Arc::new(CamelCase),
        Arc::new(PascalCase),
    ]
}

/// A source key chosen for one destination property.
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch {
    pub source_key: String,
    pub confidence: f64,
}

pub struct ConventionMatcher {
    conventions: RwLock<Vec<Arc<dyn NamingConvention>>>,
    min_confidence: f64,
}

impl fmt::Debug for ConventionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionMatcher")
            .field("conventions", &self.convention_names())
            .field("min_confidence", &self.min_confidence)
            .finish()
    }
}

impl Default for ConventionMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl ConventionMatcher {
    #[must_use]
    pub fn new(min_confidence: f64) -> Self {
        Self {
            conventions: RwLock::new(default_conventions()),
            min_confidence,
        }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Add a convention; it is consulted after the ones already registered.
    pub fn register(&self, convention: Arc<dyn NamingConvention>) {
        debug!(convention = convention.name(), "Registering naming convention");
        self.conventions.write().push(convention);
    }

    pub fn reset_to_defaults(&self) {
        *self.conventions.write() = default_conventions();
    }

    pub fn convention_names(&self) -> Vec<String> {
        self.conventions
            .read()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// First registered convention recognizing `name`.
    pub fn detect(&self, name: &str) -> Option<Arc<dyn NamingConvention>> {
        self.conventions
            .read()
            .iter()
            .find(|c| c.matches(name))
            .cloned()
    }

    pub fn canonical(&self, name: &str) -> Vec<String> {
        match self.detect(name) {
            Some(convention) => convention.normalize(name),
            None => split_words(name),
        }
    }

    /// Score that `source` and `destination` name the same property.
    pub fn confidence(&self, source: &str, destination: &str) -> f64 {
        token_similarity(&self.canonical(source), &self.canonical(destination))
    }

    /// Best source key for `destination` at or above the threshold.
    ///
    /// Ties go to the candidate seen first.
    pub fn best_match<'a, I>(&self, destination: &str, candidates: I) -> Option<NameMatch>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let target = self.canonical(destination);
        let mut best: Option<NameMatch> = None;

        for candidate in candidates {
            let confidence = token_similarity(&self.canonical(candidate), &target);
            trace!(destination, candidate, confidence, "Scored candidate");

            if confidence < self.min_confidence || confidence == 0.0 {
                continue;
            }
            let improves = match &best {
                Some(current) => confidence > current.confidence,
                None => true,
            };
            if improves {
                best = Some(NameMatch {
                    source_key: candidate.to_string(),
                    confidence,
                });
            }
        }
        best
    }
}
