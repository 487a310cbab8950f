//! Validation error types
//!
//! A `ValidationError` always carries every violation found in one pass,
//! never just the first.

use std::fmt;

use thiserror::Error;

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending JSON key, query parameter or path segment
    pub field: &'static str,
    /// Client-facing message (e.g. "Name is required")
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }

    pub fn null_value(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("{} cannot be null", label))
    }

    pub fn type_mismatch(field: &'static str, label: &str, expected: &str) -> Self {
        Self::new(field, format!("{} must be a {}", label, expected))
    }

    pub fn length(field: &'static str, label: &str, min: usize, max: usize) -> Self {
        Self::new(
            field,
            format!("{} must be between {} and {} characters", label, min, max),
        )
    }

    pub fn not_in_set(field: &'static str, label: &str, allowed: &[&str]) -> Self {
        Self::new(
            field,
            format!("{} must be one of: {}", label, allowed.join(", ")),
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Client input failed validation (HTTP 400)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_messages(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(violation: Violation) -> Self {
        Self::new(vec![violation])
    }

    /// Path id that is not a well-formed record identifier
    pub fn invalid_id() -> Self {
        Self::single(Violation::new("id", "Invalid lightsaber ID format"))
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation concerns the given field
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Fails with every collected violation, or succeeds if there are none
    pub fn check(violations: Vec<Violation>) -> ValidationResult<()> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self::new(violations))
        }
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_joins_all_violations() {
        let err = ValidationError::new(vec![
            Violation::required("name", "Name"),
            Violation::not_in_set("color", "Color", &["blue", "red"]),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Name is required, Color must be one of: blue, red"
        );
        assert!(err.has_field("color"));
        assert!(!err.has_field("creator"));
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationError::check(Vec::new()).is_ok());
        assert!(ValidationError::check(vec![Violation::required("name", "Name")]).is_err());
    }
}
