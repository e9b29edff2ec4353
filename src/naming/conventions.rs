//! Built-in naming conventions.

use super::convention::{capitalize, split_words, NamingConvention};

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn is_upper_alnum(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// Words separated by `separator`, every word matching `word_char`, no empty words.
fn separated_words(token: &str, separator: char, word_char: fn(char) -> bool) -> bool {
    !token.is_empty()
        && token
            .split(separator)
            .all(|word| !word.is_empty() && word.chars().all(word_char))
}

/// `first_name`
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCase;

impl NamingConvention for SnakeCase {
    fn name(&self) -> &str {
        "snake_case"
    }

    fn matches(&self, token: &str) -> bool {
        token.starts_with(|c: char| c.is_ascii_lowercase())
            && separated_words(token, '_', is_lower_alnum)
    }

    fn normalize(&self, token: &str) -> Vec<String> {
        token
            .split('_')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    fn denormalize(&self, words: &[String]) -> String {
        words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// `first-name`
#[derive(Debug, Default, Clone, Copy)]
pub struct KebabCase;

impl NamingConvention for KebabCase {
    fn name(&self) -> &str {
        "kebab-case"
    }

    fn matches(&self, token: &str) -> bool {
        token.contains('-') && separated_words(token, '-', is_lower_alnum)
    }

    fn normalize(&self, token: &str) -> Vec<String> {
        token
            .split('-')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    fn denormalize(&self, words: &[String]) -> String {
        words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// `FIRST_NAME`
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreamingSnakeCase;

impl NamingConvention for ScreamingSnakeCase {
    fn name(&self) -> &str {
        "SCREAMING_SNAKE_CASE"
    }

    fn matches(&self, token: &str) -> bool {
        token.chars().any(|c| c.is_ascii_uppercase())
            && separated_words(token, '_', is_upper_alnum)
    }

    fn normalize(&self, token: &str) -> Vec<String> {
        token
            .split('_')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    fn denormalize(&self, words: &[String]) -> String {
        words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// `firstName`
#[derive(Debug, Default, Clone, Copy)]
pub struct CamelCase;

impl NamingConvention for CamelCase {
    fn name(&self) -> &str {
        "camelCase"
    }

    fn matches(&self, token: &str) -> bool {
        token.starts_with(|c: char| c.is_ascii_lowercase())
            && token.chars().all(|c| c.is_ascii_alphanumeric())
    }

    fn normalize(&self, token: &str) -> Vec<String> {
        split_words(token)
    }

    fn denormalize(&self, words: &[String]) -> String {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let lower = w.to_lowercase();
                if i == 0 {
                    lower
                } else {
                    capitalize(&lower)
                }
            })
            .collect()
    }
}

/// `FirstName`
#[derive(Debug, Default, Clone, Copy)]
pub struct PascalCase;

impl NamingConvention for PascalCase {
    fn name(&self) -> &str {
        "PascalCase"
    }

    fn matches(&self, token: &str) -> bool {
        token.starts_with(|c: char| c.is_ascii_uppercase())
            && token.chars().all(|c| c.is_ascii_alphanumeric())
            && token.chars().any(|c| c.is_ascii_lowercase())
    }

    fn normalize(&self, token: &str) -> Vec<String> {
        split_words(token)
    }

    fn denormalize(&self, words: &[String]) -> String {
        words.iter().map(|w| capitalize(&w.to_lowercase())).collect()
    }
}
