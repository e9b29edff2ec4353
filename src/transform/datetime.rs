//! Date/time reformatting on chrono.

use super::transformer::{TransformContext, ValueTransformer};
use crate::error::TransformError;
use crate::input::value_kind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::fmt::Write;
use std::sync::Arc;

/// Parses a timestamp and renders it in another format.
///
/// Strings are parsed with `input_format` (RFC 3339 when unset); numbers are
/// read as unix seconds. Naive inputs are taken to be UTC. Output uses
/// `output_format` (RFC 3339 when unset). `null` passes through.
///
/// ```rust
/// use automap_core::transform::DateTimeTransformer;
/// use serde_json::json;
///
/// let transformer = DateTimeTransformer::new()
///     .with_input_format("%d/%m/%Y")
///     .with_output_format("%Y-%m-%d");
/// assert_eq!(transformer.convert(json!("09/03/2024")).unwrap(), json!("2024-03-09"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateTimeTransformer {
    input_format: Option<String>,
    output_format: Option<String>,
}

impl DateTimeTransformer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input_format(mut self, format: impl Into<String>) -> Self {
        self.input_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    pub fn convert(&self, value: Value) -> Result<Value, TransformError> {
        let parsed = match &value {
            Value::Null => return Ok(value),
            Value::String(text) => self.parse(text)?,
            Value::Number(n) => {
                let seconds = n.as_i64().ok_or_else(|| TransformError::Parse {
                    input: n.to_string(),
                    target: "datetime".to_string(),
                    reason: "timestamp must be whole seconds".to_string(),
                })?;
                DateTime::from_timestamp(seconds, 0)
                    .map(|dt| dt.fixed_offset())
                    .ok_or_else(|| TransformError::Parse {
                        input: n.to_string(),
                        target: "datetime".to_string(),
                        reason: "timestamp out of range".to_string(),
                    })?
            }
            other => {
                return Err(TransformError::UnexpectedKind {
                    expected: "date/time string or unix timestamp".to_string(),
                    actual_kind: value_kind(other).to_string(),
                })
            }
        };
        self.render(&parsed).map(Value::String)
    }

    fn parse(&self, text: &str) -> Result<DateTime<FixedOffset>, TransformError> {
        let Some(format) = self.input_format.as_deref() else {
            return DateTime::parse_from_rfc3339(text).map_err(|e| parse_failure(text, "RFC 3339", e));
        };

        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
        }
        match NaiveDate::parse_from_str(text, format) {
            Ok(date) => Ok(Utc
                .from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
                .fixed_offset()),
            Err(e) => Err(parse_failure(text, format, e)),
        }
    }

    fn render(&self, dt: &DateTime<FixedOffset>) -> Result<String, TransformError> {
        let Some(format) = self.output_format.as_deref() else {
            return Ok(dt.to_rfc3339());
        };

        // chrono reports an unknown specifier as fmt::Error at display time
        let mut rendered = String::new();
        write!(&mut rendered, "{}", dt.format(format)).map_err(|_| TransformError::Parse {
            input: dt.to_rfc3339(),
            target: format!("datetime ({format})"),
            reason: "invalid output format".to_string(),
        })?;
        Ok(rendered)
    }
}

fn parse_failure(text: &str, format: &str, error: chrono::ParseError) -> TransformError {
    TransformError::Parse {
        input: text.to_string(),
        target: format!("datetime ({format})"),
        reason: error.to_string(),
    }
}

impl ValueTransformer for DateTimeTransformer {
    fn name(&self) -> &str {
        "datetime"
    }

    fn transform(&self, value: Value, _context: &TransformContext<'_>) -> Result<Value, TransformError> {
        self.convert(value)
    }

    /// Formats swapped.
    fn inverse(&self) -> Option<Arc<dyn ValueTransformer>> {
        Some(Arc::new(DateTimeTransformer {
            input_format: self.output_format.clone(),
            output_format: self.input_format.clone(),
        }))
    }
}
