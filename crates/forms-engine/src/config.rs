//! Engine configuration
//!
//! Every section is optional in the TOML source; missing keys keep their
//! defaults.
//!
//! ```toml
//! [formats]
//! phone = '^\+?[0-9 ]{7,}$'
//!
//! [messages]
//! min_length = "Type at least {value} characters"
//!
//! [factory]
//! choice_option_count = 3
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::RuleType;
use crate::error::{FormsError, Result};

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Built-in format patterns
    pub formats: FormatPatterns,
    /// Default message templates
    pub messages: MessageTemplates,
    /// Field factory defaults
    pub factory: FactoryConfig,
}

impl EngineConfig {
    /// Parse from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| FormsError::InvalidConfig(e.to_string()))
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FormsError::InvalidConfig(e.to_string()))
    }
}

/// Regular expressions behind the `email`, `phone` and `url` rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPatterns {
    pub email: String,
    pub phone: String,
    pub url: String,
}

impl Default for FormatPatterns {
    fn default() -> Self {
        Self {
            email: r"^[^\s@]+@[^\s@]+\.[^\s@]+$".into(),
            phone: r"^\+?[0-9\s\-().]{7,20}$".into(),
            url: r"^https?://[^\s/$.?#][^\s]*\.[^\s]+$".into(),
        }
    }
}

/// Default message per rule type.
///
/// `{label}` expands to the field label, `{value}` to the rule parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub required: String,
    pub min_length: String,
    pub max_length: String,
    pub pattern: String,
    pub email: String,
    pub phone: String,
    pub url: String,
    pub custom: String,
}

impl MessageTemplates {
    pub fn template_for(&self, rule_type: RuleType) -> &str {
        match rule_type {
            RuleType::Required => &self.required,
            RuleType::MinLength => &self.min_length,
            RuleType::MaxLength => &self.max_length,
            RuleType::Pattern => &self.pattern,
            RuleType::Email => &self.email,
            RuleType::Phone => &self.phone,
            RuleType::Url => &self.url,
            RuleType::Custom => &self.custom,
        }
    }
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            required: "{label} is required".into(),
            min_length: "Minimum of {value} characters required".into(),
            max_length: "Maximum of {value} characters allowed".into(),
            pattern: "Invalid format".into(),
            email: "Please enter a valid email address".into(),
            phone: "Please enter a valid phone number".into(),
            url: "Please enter a valid URL".into(),
            custom: "Invalid value".into(),
        }
    }
}

/// Defaults applied by the field factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Placeholder options seeded into new choice fields
    pub choice_option_count: usize,
    /// Timezone of new appointment fields
    pub appointment_timezone: String,
    /// Slot length of new appointment fields
    pub appointment_slot_minutes: u32,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            choice_option_count: 4,
            appointment_timezone: "UTC".into(),
            appointment_slot_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            [messages]
            min_length = "Type at least {value} characters"

            [factory]
            choice_option_count = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.messages.min_length, "Type at least {value} characters");
        assert_eq!(config.messages.required, "{label} is required");
        assert_eq!(config.factory.choice_option_count, 2);
        assert_eq!(config.factory.appointment_timezone, "UTC");
        assert_eq!(config.formats, FormatPatterns::default());
    }

    #[test]
    fn test_bad_toml() {
        let err = EngineConfig::from_toml_str("[factory]\nchoice_option_count = \"many\"").unwrap_err();
        assert!(matches!(err, FormsError::InvalidConfig(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
