//! Error types for the mapping engine.
//!
//! Every failure carries structured context (type names, property names, value
//! kinds, strategies tried) so callers can branch on it without parsing strings.

use thiserror::Error;

/// Failures raised while normalizing an input into a `RawRecord`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydrationError {
    /// No registered extraction strategy accepts this input.
    #[error(
        "No extraction strategy supports input kind '{input_kind}' for destination '{destination}' (tried: {tried:?})"
    )]
    UnsupportedInputKind {
        input_kind: String,
        destination: String,
        tried: Vec<String>,
    },

    /// Nested extraction went deeper than the configured limit.
    #[error("Cyclic object graph detected while extracting '{type_name}': depth {depth} exceeds limit {max_depth}")]
    CyclicGraphDetected {
        type_name: String,
        depth: usize,
        max_depth: usize,
    },
}

/// Failures raised by value transformers.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The value was not of a kind the transformer accepts.
    #[error("expected {expected}, got {actual_kind}")]
    UnexpectedKind {
        expected: String,
        actual_kind: String,
    },

    /// The value had the right kind but its content could not be parsed.
    #[error("could not parse '{input}' as {target}: {reason}")]
    Parse {
        input: String,
        target: String,
        reason: String,
    },

    /// A collection element could not be mapped into its item type.
    #[error("element {index} could not be mapped: {cause}")]
    Element {
        index: String,
        #[source]
        cause: Box<MappingError>,
    },

    /// Failure reported by a user-supplied transformer.
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl TransformError {
    /// Returns the cycle failure buried in a nested mapping, if any.
    pub fn cyclic_cause(&self) -> Option<&MappingError> {
        let cause = match self {
            TransformError::Element { cause, .. } => cause.as_ref(),
            TransformError::Custom(error) => error.downcast_ref::<MappingError>()?,
            _ => return None,
        };
        match cause {
            cyclic @ MappingError::CyclicGraphDetected { .. } => Some(cyclic),
            MappingError::TransformationFailed { cause, .. } => cause.cyclic_cause(),
            _ => None,
        }
    }
}

/// Failures surfaced by the mapper.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The destination type was never registered with the mapper.
    #[error("Destination type '{type_name}' is not registered")]
    DestinationTypeNotFound { type_name: String },

    /// The source could not be normalized at all.
    #[error("Unsupported source type '{source_kind}' for destination '{destination}'")]
    UnsupportedSourceType {
        source_kind: String,
        destination: String,
        #[source]
        cause: HydrationError,
    },

    /// A declared transformer failed for one property.
    #[error(
        "Transformation of property '{property}' on '{destination}' failed in {transformer}: {reason}"
    )]
    TransformationFailed {
        destination: String,
        property: String,
        transformer: String,
        reason: String,
        #[source]
        cause: TransformError,
    },

    /// The recursion guard tripped.
    #[error("Cyclic object graph detected mapping into '{type_name}' at depth {depth} (limit {max_depth})")]
    CyclicGraphDetected {
        type_name: String,
        depth: usize,
        max_depth: usize,
    },

    /// One element of an array mapping failed.
    #[error("Element {index} of array mapping into '{destination}' failed: {cause}")]
    ElementFailed {
        index: usize,
        destination: String,
        #[source]
        cause: Box<MappingError>,
    },

    /// The mapped properties could not be deserialized into the requested Rust type.
    #[error("Typed conversion into '{type_name}' failed: {reason}")]
    TypedConversion { type_name: String, reason: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl From<HydrationError> for MappingError {
    fn from(error: HydrationError) -> Self {
        match error {
            HydrationError::CyclicGraphDetected {
                type_name,
                depth,
                max_depth,
            } => MappingError::CyclicGraphDetected {
                type_name,
                depth,
                max_depth,
            },
            HydrationError::UnsupportedInputKind {
                input_kind,
                destination,
                tried,
            } => MappingError::UnsupportedSourceType {
                source_kind: input_kind.clone(),
                destination: destination.clone(),
                cause: HydrationError::UnsupportedInputKind {
                    input_kind,
                    destination,
                    tried,
                },
            },
        }
    }
}

/// Failures raised by the comparison utility.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    #[error("Cannot compare {left_kind} with {right_kind}{}", describe_property(.type_name, .property))]
    ComparisonTypeMismatch {
        left_kind: String,
        right_kind: String,
        type_name: Option<String>,
        property: Option<String>,
    },

    #[error("Values of kind {kind} are not comparable{}", describe_property(.type_name, .property))]
    UncomparableValue {
        kind: String,
        type_name: Option<String>,
        property: Option<String>,
    },
}

fn describe_property(type_name: &Option<String>, property: &Option<String>) -> String {
    match (type_name, property) {
        (Some(t), Some(p)) => format!(" (property '{p}' on '{t}')"),
        (None, Some(p)) => format!(" (property '{p}')"),
        (Some(t), None) => format!(" (on '{t}')"),
        (None, None) => String::new(),
    }
}

impl ComparisonError {
    /// Attach the property being compared.
    #[must_use]
    pub fn for_property(self, type_name: &str, name: &str) -> Self {
        match self {
            ComparisonError::ComparisonTypeMismatch {
                left_kind,
                right_kind,
                ..
            } => ComparisonError::ComparisonTypeMismatch {
                left_kind,
                right_kind,
                type_name: Some(type_name.to_string()),
                property: Some(name.to_string()),
            },
            ComparisonError::UncomparableValue { kind, .. } => ComparisonError::UncomparableValue {
                kind,
                type_name: Some(type_name.to_string()),
                property: Some(name.to_string()),
            },
        }
    }
}

/// Invalid or unloadable mapper configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    Load(String),
}

impl ConfigurationError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigurationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(error: config::ConfigError) -> Self {
        ConfigurationError::Load(error.to_string())
    }
}

pub type MappingResult<T> = Result<T, MappingError>;
pub type HydrationResult<T> = Result<T, HydrationError>;
