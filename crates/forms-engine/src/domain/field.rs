//! Field Aggregate
//!
//! A field is one configurable input or display unit of a form. Fields are
//! treated as immutable values: every change produces a new `Field`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::conditional::{ConditionalAction, ConditionalRule};
use crate::domain::metadata::{FieldMetadata, MetadataUpdate};
use crate::domain::value_objects::{FieldId, FieldOption, FieldType, ValidationRule};

/// Field aggregate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default)]
    pub validation: Vec<ValidationRule>,
    #[serde(default)]
    pub conditional: Option<ConditionalRule>,
    #[serde(default)]
    pub metadata: FieldMetadata,
}

impl Field {
    /// Apply a partial update, returning the merged field.
    ///
    /// Top-level keys present in `update` replace the current ones. Metadata
    /// is merged one level deep and `updatedAt` is refreshed. The id never
    /// changes.
    pub fn apply(&self, update: &FieldUpdate) -> Field {
        let mut next = self.clone();

        if let Some(kind) = update.field_type {
            next.field_type = kind;
        }
        if let Some(label) = &update.label {
            next.label = label.clone();
        }
        if let Some(placeholder) = &update.placeholder {
            next.placeholder = placeholder.clone();
        }
        if let Some(help_text) = &update.help_text {
            next.help_text = help_text.clone();
        }
        if let Some(required) = update.required {
            next.required = required;
        }
        if let Some(order) = update.order {
            next.order = order;
        }
        if let Some(options) = &update.options {
            next.options = options.clone();
        }
        if let Some(validation) = &update.validation {
            next.validation = validation.clone();
        }
        if let Some(conditional) = &update.conditional {
            next.conditional = conditional.clone();
        }
        if let Some(metadata) = &update.metadata {
            if let Some(details) = &metadata.details {
                next.metadata.details = details.clone();
            }
            next.metadata
                .extra
                .extend(metadata.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        next.metadata.updated_at = Utc::now().max(self.metadata.updated_at);
        next
    }

    /// Whether the field is active given the current form values.
    ///
    /// Fields without a conditional rule are always active. `Hide` rules
    /// deactivate the field while they hold; `Show` rules activate it only
    /// while they hold; `Require` rules never hide the field.
    pub fn is_active(&self, values: &HashMap<FieldId, Value>) -> bool {
        match &self.conditional {
            None => true,
            Some(rule) => match rule.action {
                ConditionalAction::Show => rule.is_satisfied(values),
                ConditionalAction::Hide => !rule.is_satisfied(values),
                ConditionalAction::Require => true,
            },
        }
    }

    /// Effective required flag, including a satisfied `Require` rule
    pub fn is_required(&self, values: &HashMap<FieldId, Value>) -> bool {
        self.required
            || matches!(
                &self.conditional,
                Some(rule) if rule.action == ConditionalAction::Require && rule.is_satisfied(values)
            )
    }

    /// Display name used in generated messages
    pub fn display_label(&self) -> &str {
        let label = self.label.trim();
        if label.is_empty() {
            "This field"
        } else {
            label
        }
    }
}

/// Partial update of a [`Field`].
///
/// `None` leaves the key untouched. For the nullable keys (`options`,
/// `conditional`) `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldUpdate {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub required: Option<bool>,
    pub order: Option<usize>,
    pub options: Option<Option<Vec<FieldOption>>>,
    pub validation: Option<Vec<ValidationRule>>,
    pub conditional: Option<Option<ConditionalRule>>,
    pub metadata: Option<MetadataUpdate>,
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn options(mut self, options: Option<Vec<FieldOption>>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn validation(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation = Some(rules);
        self
    }

    pub fn conditional(mut self, rule: Option<ConditionalRule>) -> Self {
        self.conditional = Some(rule);
        self
    }

    pub fn metadata(mut self, metadata: MetadataUpdate) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conditional::{ConditionLogic, ConditionalOperator};
    use crate::domain::metadata::{HeadingSize, TypeMetadata};
    use serde_json::json;

    fn sample() -> Field {
        Field {
            id: FieldId::from("f1"),
            field_type: FieldType::Text,
            label: "Name".into(),
            placeholder: String::new(),
            help_text: String::new(),
            required: false,
            order: 0,
            options: None,
            validation: vec![],
            conditional: None,
            metadata: FieldMetadata::default(),
        }
    }

    #[test]
    fn test_apply_merges_top_level() {
        let field = sample();
        let updated = field.apply(&FieldUpdate::new().label("Full name").required(true));
        assert_eq!(updated.id, field.id);
        assert_eq!(updated.label, "Full name");
        assert!(updated.required);
        assert_eq!(updated.placeholder, field.placeholder);
        assert!(updated.metadata.updated_at >= field.metadata.updated_at);
        assert_eq!(updated.metadata.created_at, field.metadata.created_at);
        // original untouched
        assert_eq!(field.label, "Name");
    }

    #[test]
    fn test_apply_merges_metadata_shallow() {
        let mut field = sample();
        field.metadata.extra.insert("a".into(), json!(1));
        field.metadata.extra.insert("b".into(), json!(2));

        let update = MetadataUpdate::details(TypeMetadata::Heading { size: HeadingSize::H3 })
            .with_extra("b", json!(20))
            .with_extra("c", json!(30));
        let updated = field.apply(&FieldUpdate::new().metadata(update));

        assert_eq!(updated.metadata.details, TypeMetadata::Heading { size: HeadingSize::H3 });
        assert_eq!(updated.metadata.extra["a"], json!(1));
        assert_eq!(updated.metadata.extra["b"], json!(20));
        assert_eq!(updated.metadata.extra["c"], json!(30));
    }

    #[test]
    fn test_apply_clears_conditional() {
        let mut field = sample();
        field.conditional = Some(ConditionalRule::show_when("x", ConditionalOperator::IsNotEmpty, json!(null)));
        let updated = field.apply(&FieldUpdate::new().conditional(None));
        assert!(updated.conditional.is_none());
    }

    #[test]
    fn test_activation() {
        let mut field = sample();
        let values: HashMap<FieldId, Value> = [(FieldId::from("x"), json!("yes"))].into_iter().collect();
        assert!(field.is_active(&values));

        field.conditional = Some(ConditionalRule::show_when("x", ConditionalOperator::Equals, json!("no")));
        assert!(!field.is_active(&values));

        let mut hide = ConditionalRule::new(ConditionalAction::Hide, ConditionLogic::All);
        hide.conditions = field.conditional.take().unwrap().conditions;
        field.conditional = Some(hide);
        assert!(field.is_active(&values));
    }

    #[test]
    fn test_require_action() {
        let mut field = sample();
        let mut rule = ConditionalRule::show_when("x", ConditionalOperator::Equals, json!("yes"));
        rule.action = ConditionalAction::Require;
        field.conditional = Some(rule);

        let yes: HashMap<FieldId, Value> = [(FieldId::from("x"), json!("yes"))].into_iter().collect();
        assert!(field.is_active(&HashMap::new()));
        assert!(field.is_required(&yes));
        assert!(!field.is_required(&HashMap::new()));
    }

    #[test]
    fn test_display_label_fallback() {
        let mut field = sample();
        field.label = "  ".into();
        assert_eq!(field.display_label(), "This field");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let field: Field = serde_json::from_value(json!({
            "id": "q1",
            "type": "email",
            "label": "Email",
            "helpText": "We never share it",
            "required": true,
            "order": 2,
            "validation": [{ "type": "email" }],
            "conditional": null
        }))
        .unwrap();
        assert_eq!(field.field_type, FieldType::Email);
        assert_eq!(field.help_text, "We never share it");
        assert_eq!(field.order, 2);
        assert!(field.options.is_none());
    }
}
