//! Declarative validation rules

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of validation rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleType {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Email,
    Phone,
    Url,
    Custom,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "min-length",
            Self::MaxLength => "max-length",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Custom => "custom",
        }
    }

    /// Rule types that cannot compile without a `value`
    pub fn requires_value(&self) -> bool {
        matches!(self, Self::MinLength | Self::MaxLength | Self::Pattern)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One authored validation rule: `{ type, value?, message? }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Rule parameter as text. Numbers and booleans are accepted on input.
    #[serde(
        default,
        deserialize_with = "rule_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    pub fn new(rule_type: RuleType) -> Self {
        Self { rule_type, value: None, message: None }
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(RuleType::MinLength).with_value(min.to_string())
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(RuleType::MaxLength).with_value(max.to_string())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::new(RuleType::Pattern).with_value(source)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Override the generated default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn rule_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
