//! Conditional rules
//!
//! A field's conditional rule gates its visibility (or required-ness) on the
//! values of other fields, its *trigger fields*.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::domain::value_objects::FieldId;
use crate::value;

/// What happens to the owning field when the predicate holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionalAction {
    #[default]
    Show,
    Hide,
    /// Field stays visible and becomes required
    Require,
}

/// How multiple conditions combine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionLogic {
    #[default]
    All,
    Any,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionalOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

/// Single comparison against one trigger field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_id: FieldId,
    pub operator: ConditionalOperator,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(field_id: impl Into<FieldId>, operator: ConditionalOperator, value: Value) -> Self {
        Self { field_id: field_id.into(), operator, value }
    }

    /// Evaluate against the trigger's current value (`Null` when unset)
    pub fn matches(&self, actual: &Value) -> bool {
        match self.operator {
            ConditionalOperator::Equals => value::loosely_equal(actual, &self.value),
            ConditionalOperator::NotEquals => !value::loosely_equal(actual, &self.value),
            ConditionalOperator::Contains => contains(actual, &self.value),
            ConditionalOperator::NotContains => !contains(actual, &self.value),
            ConditionalOperator::GreaterThan => compare(actual, &self.value, |a, b| a > b),
            ConditionalOperator::LessThan => compare(actual, &self.value, |a, b| a < b),
            ConditionalOperator::IsEmpty => value::is_blank(actual),
            ConditionalOperator::IsNotEmpty => !value::is_blank(actual),
        }
    }
}

fn contains(actual: &Value, needle: &Value) -> bool {
    match actual {
        Value::Array(items) => items.iter().any(|item| value::loosely_equal(item, needle)),
        _ => match (value::as_text(actual), value::as_text(needle)) {
            (Some(haystack), Some(needle)) => haystack.contains(needle.as_ref()),
            _ => false,
        },
    }
}

fn compare(actual: &Value, expected: &Value, op: impl Fn(f64, f64) -> bool) -> bool {
    match (value::as_number(actual), value::as_number(expected)) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

static NULL: Value = Value::Null;

/// Conditional rule attached to a field
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    #[serde(default)]
    pub action: ConditionalAction,
    #[serde(default)]
    pub logic: ConditionLogic,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl ConditionalRule {
    pub fn new(action: ConditionalAction, logic: ConditionLogic) -> Self {
        Self { action, logic, conditions: Vec::new() }
    }

    /// Shorthand for a show-when rule with one condition
    pub fn show_when(field_id: impl Into<FieldId>, operator: ConditionalOperator, value: Value) -> Self {
        Self::new(ConditionalAction::Show, ConditionLogic::All).with_condition(Condition::new(
            field_id, operator, value,
        ))
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Ids referenced by the predicate, in first-reference order, without repeats
    pub fn referenced_fields(&self) -> Vec<FieldId> {
        let mut seen = HashSet::new();
        self.conditions
            .iter()
            .filter(|c| seen.insert(&c.field_id))
            .map(|c| c.field_id.clone())
            .collect()
    }

    /// Evaluate the predicate. A rule without conditions always holds.
    pub fn is_satisfied(&self, values: &HashMap<FieldId, Value>) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        let check = |c: &Condition| c.matches(values.get(&c.field_id).unwrap_or(&NULL));
        match self.logic {
            ConditionLogic::All => self.conditions.iter().all(check),
            ConditionLogic::Any => self.conditions.iter().any(check),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> HashMap<FieldId, Value> {
        pairs.iter().map(|(k, v)| (FieldId::from(*k), v.clone())).collect()
    }

    #[test]
    fn test_referenced_fields_dedup_in_order() {
        let rule = ConditionalRule::new(ConditionalAction::Show, ConditionLogic::Any)
            .with_condition(Condition::new("b", ConditionalOperator::IsNotEmpty, Value::Null))
            .with_condition(Condition::new("a", ConditionalOperator::Equals, json!("x")))
            .with_condition(Condition::new("b", ConditionalOperator::Equals, json!("y")));
        assert_eq!(rule.referenced_fields(), vec![FieldId::from("b"), FieldId::from("a")]);
    }

    #[test]
    fn test_all_vs_any() {
        let mut rule = ConditionalRule::show_when("age", ConditionalOperator::GreaterThan, json!(17))
            .with_condition(Condition::new("country", ConditionalOperator::Equals, json!("DE")));
        let vals = values(&[("age", json!("21")), ("country", json!("FR"))]);
        assert!(!rule.is_satisfied(&vals));
        rule.logic = ConditionLogic::Any;
        assert!(rule.is_satisfied(&vals));
    }

    #[test]
    fn test_missing_trigger_is_null() {
        let rule = ConditionalRule::show_when("x", ConditionalOperator::IsEmpty, Value::Null);
        assert!(rule.is_satisfied(&HashMap::new()));
    }

    #[test]
    fn test_contains_on_arrays_and_text() {
        let c = Condition::new("tags", ConditionalOperator::Contains, json!("red"));
        assert!(c.matches(&json!(["blue", "red"])));
        assert!(c.matches(&json!("bored")));
        assert!(!c.matches(&json!(["blue"])));
        assert!(!c.matches(&Value::Null));
    }

    #[test]
    fn test_non_numeric_comparison_is_false() {
        let c = Condition::new("n", ConditionalOperator::LessThan, json!(10));
        assert!(!c.matches(&json!("ten")));
        assert!(c.matches(&json!(3)));
    }

    #[test]
    fn test_empty_rule_holds() {
        let rule = ConditionalRule::new(ConditionalAction::Hide, ConditionLogic::Any);
        assert!(rule.is_satisfied(&HashMap::new()));
    }
}
