//! Error types for the forms engine

use thiserror::Error;

use crate::domain::{FieldId, RuleType};

/// Forms engine error type
#[derive(Error, Debug)]
pub enum FormsError {
    /// No field with the given id in the collection
    #[error("field not found: {0}")]
    FieldNotFound(FieldId),

    /// Index outside the collection bounds
    #[error("index {index} out of range for collection of {len} fields")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Collection length
        len: usize,
    },

    /// Engine configuration could not be applied
    #[error("config error: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the forms engine
pub type Result<T> = std::result::Result<T, FormsError>;

/// A validation rule that could not be compiled.
///
/// The rule is skipped; every other rule on the field still compiles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("rule #{index} ({rule_type}): {kind}")]
pub struct RuleConfigError {
    /// Position of the rule in the field's `validation` list
    pub index: usize,
    /// Type of the offending rule
    pub rule_type: RuleType,
    /// What was wrong with it
    pub kind: RuleConfigErrorKind,
}

/// Reason a rule failed to compile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleConfigErrorKind {
    /// Rule type needs a `value` and none was given
    #[error("missing rule value")]
    MissingValue,

    /// Length bound is not a base-10 integer
    #[error("invalid length bound: {0:?}")]
    InvalidBound(String),

    /// Pattern is not a valid regular expression
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Structural problem in a field's configuration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructuralError {
    /// Label is empty or whitespace
    #[error("Field label is required")]
    MissingLabel,

    /// Field type is missing or unrecognised
    #[error("Field type is required")]
    MissingType,

    /// Option-accepting field has no options
    #[error("At least one option is required")]
    MissingOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_message() {
        let err = FormsError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for collection of 3 fields");
    }

    #[test]
    fn test_rule_config_error_message() {
        let err = RuleConfigError {
            index: 2,
            rule_type: RuleType::MinLength,
            kind: RuleConfigErrorKind::InvalidBound("abc".into()),
        };
        assert_eq!(err.to_string(), "rule #2 (min-length): invalid length bound: \"abc\"");
    }
}
