//! # Comparison Support
//!
//! Ordering of mapped values, for sorting mapped collections by a property.
//!
//! Scalars of the same kind compare naturally. `null` (and a missing property)
//! orders before every scalar. Arrays and objects are not comparable, and two
//! different scalar kinds are a type mismatch; neither case is ever coerced.
//!
//! ```rust
//! use automap_core::compare::compare_values;
//! use serde_json::json;
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare_values(&json!(1), &json!(2.5)).unwrap(), Ordering::Less);
//! assert!(compare_values(&json!("1"), &json!(1)).is_err());
//! ```

use crate::error::ComparisonError;
use crate::input::value_kind;
use crate::mapper::MappedObject;
use serde_json::{Number, Value};
use std::cmp::Ordering;

pub fn compare_values(left: &Value, right: &Value) -> Result<Ordering, ComparisonError> {
    match (left, right) {
        (Value::Array(_) | Value::Object(_), _) => Err(uncomparable(left)),
        (_, Value::Array(_) | Value::Object(_)) => Err(uncomparable(right)),
        (Value::Null, Value::Null) => Ok(Ordering::Equal),
        (Value::Null, _) => Ok(Ordering::Less),
        (_, Value::Null) => Ok(Ordering::Greater),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => Ok(compare_numbers(a, b)),
        _ => Err(ComparisonError::ComparisonTypeMismatch {
            left_kind: value_kind(left).to_string(),
            right_kind: value_kind(right).to_string(),
            type_name: None,
            property: None,
        }),
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    // JSON numbers are never NaN, so the float comparison is total.
    let x = a.as_f64().unwrap_or_default();
    let y = b.as_f64().unwrap_or_default();
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

fn uncomparable(value: &Value) -> ComparisonError {
    ComparisonError::UncomparableValue {
        kind: value_kind(value).to_string(),
        type_name: None,
        property: None,
    }
}

/// Compare two mapped objects by one property. A missing property is `null`.
pub fn compare_property(
    left: &MappedObject,
    right: &MappedObject,
    property: &str,
) -> Result<Ordering, ComparisonError> {
    if left.type_name() != right.type_name() {
        return Err(ComparisonError::ComparisonTypeMismatch {
            left_kind: left.type_name().to_string(),
            right_kind: right.type_name().to_string(),
            type_name: None,
            property: Some(property.to_string()),
        });
    }

    let null = Value::Null;
    compare_values(
        left.get(property).unwrap_or(&null),
        right.get(property).unwrap_or(&null),
    )
    .map_err(|e| e.for_property(left.type_name(), property))
}

/// Stable sort by one property. On error the slice order is unspecified and
/// the first failure is returned.
pub fn sort_by_property(objects: &mut [MappedObject], property: &str) -> Result<(), ComparisonError> {
    let mut failure: Option<ComparisonError> = None;
    objects.sort_by(|a, b| match compare_property(a, b, property) {
        Ok(ordering) => ordering,
        Err(error) => {
            failure.get_or_insert(error);
            Ordering::Equal
        }
    });

    match failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
