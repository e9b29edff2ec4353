//! Naming convention contract and the shared token similarity score.

use std::collections::HashMap;
use std::fmt;

/// Scale applied to partial overlaps so only identical token lists reach 1.0.
const PARTIAL_MATCH_SCALE: f64 = 0.95;

/// A lexical convention for property names.
///
/// The canonical form is a list of lower-case words: `first_name`, `firstName`
/// and `FIRST_NAME` all normalize to `["first", "name"]`.
pub trait NamingConvention: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Whether `token` is written in this convention.
    fn matches(&self, token: &str) -> bool;

    fn normalize(&self, token: &str) -> Vec<String>;

    fn denormalize(&self, words: &[String]) -> String;

    /// Score in [0, 1] that both names denote the same property, reading both
    /// through this convention.
    fn confidence(&self, source: &str, destination: &str) -> f64 {
        token_similarity(&self.normalize(source), &self.normalize(destination))
    }
}

/// Similarity of two canonical token lists.
///
/// - identical lists score 1.0
/// - lists with no shared token score 0.0
/// - otherwise the Dice coefficient over token multisets, scaled below 1.0
pub fn token_similarity(left: &[String], right: &[String]) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in left {
        *counts.entry(token.as_str()).or_default() += 1;
    }

    let mut shared = 0usize;
    for token in right {
        if let Some(count) = counts.get_mut(token.as_str()) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    if shared == 0 {
        return 0.0;
    }

    let dice = (2 * shared) as f64 / (left.len() + right.len()) as f64;
    dice * PARTIAL_MATCH_SCALE
}

/// Split a name on separators and case boundaries into lower-case words.
///
/// Acronyms stay together (`userID` -> `user`, `id`; `HTTPServer` -> `http`, `server`).
pub fn split_words(token: &str) -> Vec<String> {
    let mut words = Vec::new();
    for segment in token.split(|c: char| c == '_' || c == '-' || c == ' ' || c == '.') {
        split_case_boundaries(segment, &mut words);
    }
    words
}

fn split_case_boundaries(segment: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = segment.chars().collect();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
}

/// Upper-case the first character of a word.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
