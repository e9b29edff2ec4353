//! Scalar casts between JSON kinds.

use super::transformer::{TransformContext, ValueTransformer};
use crate::error::TransformError;
use crate::input::value_kind;
use serde_json::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    String,
    Integer,
    Float,
    Boolean,
}

impl CastTarget {
    fn label(self) -> &'static str {
        match self {
            CastTarget::String => "string",
            CastTarget::Integer => "integer",
            CastTarget::Float => "float",
            CastTarget::Boolean => "boolean",
        }
    }
}

/// Casts scalars to one kind. `null` passes through untouched.
#[derive(Debug, Clone)]
pub struct CastTransformer {
    target: CastTarget,
    name: String,
}

impl CastTransformer {
    pub fn new(target: CastTarget) -> Self {
        Self {
            target,
            name: format!("cast<{}>", target.label()),
        }
    }

    pub fn cast(&self, value: Value) -> Result<Value, TransformError> {
        if value.is_null() {
            return Ok(value);
        }
        match self.target {
            CastTarget::String => to_string(value),
            CastTarget::Integer => to_integer(value),
            CastTarget::Float => to_float(value),
            CastTarget::Boolean => to_boolean(value),
        }
    }
}

impl ValueTransformer for CastTransformer {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, value: Value, _context: &TransformContext<'_>) -> Result<Value, TransformError> {
        self.cast(value)
    }
}

fn unexpected(expected: CastTarget, value: &Value) -> TransformError {
    TransformError::UnexpectedKind {
        expected: format!("value castable to {}", expected.label()),
        actual_kind: value_kind(value).to_string(),
    }
}

fn parse_error(input: &str, target: CastTarget, reason: impl ToString) -> TransformError {
    TransformError::Parse {
        input: input.to_string(),
        target: target.label().to_string(),
        reason: reason.to_string(),
    }
}

fn to_string(value: Value) -> Result<Value, TransformError> {
    match value {
        Value::String(_) => Ok(value),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(unexpected(CastTarget::String, &other)),
    }
}

fn to_integer(value: Value) -> Result<Value, TransformError> {
    match value {
        Value::Number(ref n) if n.is_i64() || n.is_u64() => Ok(value),
        Value::Number(ref n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Value::from(f as i64)),
            _ => Err(parse_error(&n.to_string(), CastTarget::Integer, "has a fractional part")),
        },
        Value::String(ref s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| parse_error(s, CastTarget::Integer, e)),
        Value::Bool(b) => Ok(Value::from(i64::from(b))),
        other => Err(unexpected(CastTarget::Integer, &other)),
    }
}

fn to_float(value: Value) -> Result<Value, TransformError> {
    let float = match value {
        Value::Number(ref n) => n.as_f64(),
        Value::String(ref s) => Some(
            s.trim()
                .parse::<f64>()
                .map_err(|e| parse_error(s, CastTarget::Float, e))?,
        ),
        ref other => return Err(unexpected(CastTarget::Float, other)),
    };
    float
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| parse_error(&value.to_string(), CastTarget::Float, "not a finite number"))
}

fn to_boolean(value: Value) -> Result<Value, TransformError> {
    match value {
        Value::Bool(_) => Ok(value),
        Value::Number(ref n) => Ok(Value::Bool(n.as_f64().is_some_and(|f| f != 0.0))),
        Value::String(ref s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" | "" => Ok(Value::Bool(false)),
            _ => Err(parse_error(s, CastTarget::Boolean, "unrecognized boolean literal")),
        },
        other => Err(unexpected(CastTarget::Boolean, &other)),
    }
}
