use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Missing,
    NotNumeric,
    NotAFlag,
    UnknownOption,
}

/// A form field that could not be turned into its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {}", describe(.kind, .value))]
pub struct ValidationError {
    pub field: String,
    pub kind: ValidationErrorKind,
    pub value: String,
}

fn describe(kind: &ValidationErrorKind, value: &str) -> String {
    match kind {
        ValidationErrorKind::Missing => "value is required".to_string(),
        ValidationErrorKind::NotNumeric => format!("'{value}' is not a number"),
        ValidationErrorKind::NotAFlag => format!("'{value}' must be 0 or 1"),
        ValidationErrorKind::UnknownOption => {
            format!("'{value}' is not one of the allowed options")
        }
    }
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        kind: ValidationErrorKind,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            value: value.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Missing, "")
    }
}
