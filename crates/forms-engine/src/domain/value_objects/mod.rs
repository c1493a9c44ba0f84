//! Value Objects module
//!
//! Immutable domain primitives shared by fields and rules.

pub mod field_type;
pub mod rule;

pub use field_type::FieldType;
pub use rule::{RuleType, ValidationRule};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field identifier (Value Object)
///
/// Opaque and immutable once assigned. Fresh ids are UUID v4 strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh unique id
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing id
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}

/// One entry of a choice field's option list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_unique() {
        assert_ne!(FieldId::new(), FieldId::new());
    }

    #[test]
    fn test_field_id_serializes_as_string() {
        let id = FieldId::from_string("name");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"name\"");
    }
}
