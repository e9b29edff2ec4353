use proptest::prelude::*;

/// A lower-case word long enough that no convention reads it as an acronym.
pub fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

/// Canonical token lists.
pub fn canonical_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 1..5)
}

/// Property names in assorted conventions.
pub fn property_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{2,6}(_[a-z]{2,6}){0,3}",
        "[a-z]{2,6}([A-Z][a-z]{2,6}){0,3}",
        "[A-Z][a-z]{2,6}([A-Z][a-z]{2,6}){0,3}",
        "[a-z]{2,6}(-[a-z]{2,6}){0,3}",
        "[A-Z]{2,6}(_[A-Z]{2,6}){0,3}",
    ]
}

/// Hydrator priorities, possibly repeated.
pub fn priorities_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-100i32..=200, 1..8)
}
