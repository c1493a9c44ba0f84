//! Validation rule compiler
//!
//! Turns a field's `required` flag and `validation` list into an ordered
//! set of executable checks:
//!
//! 1. the required check, when the field is required;
//! 2. the format check implied by `email`, `phone` and `url` field types,
//!    unless the field already lists that rule;
//! 3. the authored rules, in stored order.
//!
//! Rules that cannot compile are reported and skipped; the rest still run.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::config::{EngineConfig, MessageTemplates};
use crate::domain::{Field, FieldId, FieldType, RuleType, ValidationRule};
use crate::error::{FormsError, Result, RuleConfigError, RuleConfigErrorKind};
use crate::validation::messages::default_message;
use crate::value;

/// Host-supplied predicate for `custom` rules
pub type CustomPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Executable form of one rule
#[derive(Clone)]
pub enum Check {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Matches(Regex),
    Custom(CustomPredicate),
    /// `custom` rule with no registered predicate
    Noop,
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::MinLength(n) => write!(f, "MinLength({n})"),
            Self::MaxLength(n) => write!(f, "MaxLength({n})"),
            Self::Matches(re) => write!(f, "Matches({})", re.as_str()),
            Self::Custom(_) => write!(f, "Custom"),
            Self::Noop => write!(f, "Noop"),
        }
    }
}

/// A check paired with the message it reports on failure
#[derive(Debug, Clone)]
pub struct CompiledCheck {
    pub rule_type: RuleType,
    pub check: Check,
    pub message: String,
}

/// Compiled rules for one field
#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    pub field_id: FieldId,
    pub checks: Vec<CompiledCheck>,
    /// Rules skipped because their definition was malformed
    pub errors: Vec<RuleConfigError>,
}

impl CompiledRuleSet {
    /// Run every check against `value` and collect all failure messages.
    ///
    /// Blank values (absent, or empty after trimming) only ever fail the
    /// required check.
    pub fn evaluate(&self, value: &Value) -> Vec<String> {
        let blank = value::is_blank(value);
        let text = value::as_text(value).unwrap_or_default();

        self.checks
            .iter()
            .filter(|compiled| match &compiled.check {
                Check::Required => blank,
                _ if blank => false,
                Check::MinLength(min) => text.chars().count() < *min,
                Check::MaxLength(max) => text.chars().count() > *max,
                Check::Matches(re) => !re.is_match(&*text),
                Check::Custom(predicate) => !predicate(&*text),
                Check::Noop => false,
            })
            .map(|compiled| compiled.message.clone())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Rule compiler with pre-compiled format patterns
#[derive(Clone)]
pub struct RuleCompiler {
    email: Regex,
    phone: Regex,
    url: Regex,
    messages: MessageTemplates,
    custom: HashMap<String, CustomPredicate>,
}

impl RuleCompiler {
    /// Build from config. Fails if a format pattern override is malformed.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let compile = |name: &str, source: &str| {
            Regex::new(source)
                .map_err(|e| FormsError::InvalidConfig(format!("{name} pattern: {e}")))
        };
        Ok(Self {
            email: compile("email", &config.formats.email)?,
            phone: compile("phone", &config.formats.phone)?,
            url: compile("url", &config.formats.url)?,
            messages: config.messages.clone(),
            custom: HashMap::new(),
        })
    }

    /// Register a predicate for `custom` rules whose value is `name`
    pub fn with_custom<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Compile a field's rules
    pub fn compile(&self, field: &Field) -> CompiledRuleSet {
        let label = field.display_label();
        let mut checks = Vec::new();
        let mut errors = Vec::new();

        if field.required {
            let authored = field
                .validation
                .iter()
                .find(|r| r.rule_type == RuleType::Required)
                .and_then(|r| r.message.clone());
            checks.push(CompiledCheck {
                rule_type: RuleType::Required,
                check: Check::Required,
                message: authored.unwrap_or_else(|| {
                    default_message(&self.messages, RuleType::Required, label, None)
                }),
            });
        }

        if let Some(implied) = implied_format(field.field_type) {
            if !field.validation.iter().any(|r| r.rule_type == implied) {
                let rule = ValidationRule::new(implied);
                if let Ok(check) = self.compile_check(&rule) {
                    checks.push(self.with_message(&rule, check, label));
                }
            }
        }

        for (index, rule) in field.validation.iter().enumerate() {
            if rule.rule_type == RuleType::Required && field.required {
                continue;
            }
            match self.compile_check(rule) {
                Ok(check) => checks.push(self.with_message(rule, check, label)),
                Err(kind) => {
                    let error = RuleConfigError { index, rule_type: rule.rule_type, kind };
                    warn!(field = %field.id, "skipping validation rule: {error}");
                    errors.push(error);
                }
            }
        }

        CompiledRuleSet { field_id: field.id.clone(), checks, errors }
    }

    /// Compile and evaluate in one step
    pub fn validate(&self, value: &Value, field: &Field) -> Vec<String> {
        self.compile(field).evaluate(value)
    }

    fn compile_check(&self, rule: &ValidationRule) -> std::result::Result<Check, RuleConfigErrorKind> {
        let param = rule.value.as_deref();
        if rule.rule_type.requires_value() && param.map_or(true, |v| v.trim().is_empty()) {
            return Err(RuleConfigErrorKind::MissingValue);
        }

        Ok(match rule.rule_type {
            RuleType::Required => Check::Required,
            RuleType::MinLength => Check::MinLength(parse_bound(param)?),
            RuleType::MaxLength => Check::MaxLength(parse_bound(param)?),
            RuleType::Pattern => Check::Matches(
                Regex::new(param.unwrap_or_default())
                    .map_err(|e| RuleConfigErrorKind::InvalidPattern(e.to_string()))?,
            ),
            RuleType::Email => Check::Matches(self.email.clone()),
            RuleType::Phone => Check::Matches(self.phone.clone()),
            RuleType::Url => Check::Matches(self.url.clone()),
            RuleType::Custom => match param.and_then(|name| self.custom.get(name)) {
                Some(predicate) => Check::Custom(Arc::clone(predicate)),
                None => Check::Noop,
            },
        })
    }

    fn with_message(&self, rule: &ValidationRule, check: Check, label: &str) -> CompiledCheck {
        let message = rule.message.clone().unwrap_or_else(|| {
            default_message(&self.messages, rule.rule_type, label, rule.value.as_deref())
        });
        CompiledCheck { rule_type: rule.rule_type, check, message }
    }
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self::new(&EngineConfig::default()).expect("built-in format patterns compile")
    }
}

impl fmt::Debug for RuleCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCompiler")
            .field("email", &self.email.as_str())
            .field("phone", &self.phone.as_str())
            .field("url", &self.url.as_str())
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn implied_format(kind: FieldType) -> Option<RuleType> {
    match kind {
        FieldType::Email => Some(RuleType::Email),
        FieldType::Phone => Some(RuleType::Phone),
        FieldType::Url => Some(RuleType::Url),
        _ => None,
    }
}

fn parse_bound(param: Option<&str>) -> std::result::Result<usize, RuleConfigErrorKind> {
    let raw = param.unwrap_or_default();
    raw.trim()
        .parse()
        .map_err(|_| RuleConfigErrorKind::InvalidBound(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_field;
    use serde_json::json;

    fn text_field(rules: Vec<ValidationRule>) -> Field {
        let mut field = create_field(FieldType::Text, 0);
        field.label = "Name".into();
        field.validation = rules;
        field
    }

    fn kinds(set: &CompiledRuleSet) -> Vec<RuleType> {
        set.checks.iter().map(|c| c.rule_type).collect()
    }

    #[test]
    fn test_required_comes_first() {
        let mut field = text_field(vec![ValidationRule::max_length(5), ValidationRule::min_length(2)]);
        field.required = true;
        let set = RuleCompiler::default().compile(&field);
        assert_eq!(kinds(&set), vec![RuleType::Required, RuleType::MaxLength, RuleType::MinLength]);
        assert!(set.is_clean());
    }

    #[test]
    fn test_required_rule_message_overrides_flag_default() {
        let mut field = text_field(vec![ValidationRule::new(RuleType::Required).with_message("Tell us your name")]);
        field.required = true;
        let set = RuleCompiler::default().compile(&field);
        assert_eq!(set.checks.len(), 1);
        assert_eq!(set.checks[0].message, "Tell us your name");
    }

    #[test]
    fn test_required_rule_without_flag_compiles_in_place() {
        let field = text_field(vec![ValidationRule::min_length(2), ValidationRule::new(RuleType::Required)]);
        let set = RuleCompiler::default().compile(&field);
        assert_eq!(kinds(&set), vec![RuleType::MinLength, RuleType::Required]);
    }

    #[test]
    fn test_bad_rules_are_skipped_and_reported() {
        let field = text_field(vec![
            ValidationRule::pattern("([a-z"),
            ValidationRule::new(RuleType::MinLength).with_value("three"),
            ValidationRule::new(RuleType::MaxLength),
            ValidationRule::max_length(4),
        ]);
        let set = RuleCompiler::default().compile(&field);
        assert_eq!(kinds(&set), vec![RuleType::MaxLength]);
        assert_eq!(set.errors.len(), 3);
        assert!(matches!(set.errors[0].kind, RuleConfigErrorKind::InvalidPattern(_)));
        assert_eq!(set.errors[1].kind, RuleConfigErrorKind::InvalidBound("three".into()));
        assert_eq!(set.errors[2].kind, RuleConfigErrorKind::MissingValue);
        assert_eq!(set.errors[2].index, 2);

        assert_eq!(set.evaluate(&json!("abcdef")), vec!["Maximum of 4 characters allowed"]);
    }

    #[test]
    fn test_numeric_bounds_from_json() {
        let field: Field = serde_json::from_value(json!({
            "id": "name",
            "type": "text",
            "label": "Name",
            "validation": [
                {"type": "min-length", "value": 3},
                {"type": "max-length", "value": 2.5}
            ]
        }))
        .unwrap();
        let set = RuleCompiler::default().compile(&field);
        assert_eq!(kinds(&set), vec![RuleType::MinLength]);
        assert_eq!(set.errors[0].kind, RuleConfigErrorKind::InvalidBound("2.5".into()));
        assert_eq!(set.evaluate(&json!("ab")), vec!["Minimum of 3 characters required"]);
        assert!(set.evaluate(&json!("abc")).is_empty());
    }

    #[test]
    fn test_email_type_implies_format_check_once() {
        let field = create_field(FieldType::Email, 0);
        assert_eq!(kinds(&RuleCompiler::default().compile(&field)), vec![RuleType::Email]);

        let mut explicit = field.clone();
        explicit.validation = vec![ValidationRule::new(RuleType::Email).with_message("Bad email")];
        let set = RuleCompiler::default().compile(&explicit);
        assert_eq!(kinds(&set), vec![RuleType::Email]);
        assert_eq!(set.evaluate(&json!("nope")), vec!["Bad email"]);
    }

    #[test]
    fn test_custom_predicate() {
        let field = text_field(vec![ValidationRule::new(RuleType::Custom)
            .with_value("even-length")
            .with_message("Needs an even length")]);

        let plain = RuleCompiler::default().compile(&field);
        assert!(matches!(plain.checks[0].check, Check::Noop));
        assert!(plain.evaluate(&json!("abc")).is_empty());

        let compiler = RuleCompiler::default().with_custom("even-length", |s| s.len() % 2 == 0);
        let set = compiler.compile(&field);
        assert_eq!(set.evaluate(&json!("abc")), vec!["Needs an even length"]);
        assert!(set.evaluate(&json!("abcd")).is_empty());
    }

    #[test]
    fn test_bad_format_override_fails() {
        let mut config = EngineConfig::default();
        config.formats.phone = "([0-9".into();
        assert!(matches!(RuleCompiler::new(&config), Err(FormsError::InvalidConfig(_))));
    }

    #[test]
    fn test_custom_message_templates() {
        let mut config = EngineConfig::default();
        config.messages.min_length = "{label}: at least {value}".into();
        let compiler = RuleCompiler::new(&config).unwrap();
        let field = text_field(vec![ValidationRule::min_length(3)]);
        assert_eq!(compiler.validate(&json!("ab"), &field), vec!["Name: at least 3"]);
    }

    #[test]
    fn test_length_counts_characters() {
        let field = text_field(vec![ValidationRule::max_length(3)]);
        assert!(RuleCompiler::default().validate(&json!("äöü"), &field).is_empty());
    }
}
