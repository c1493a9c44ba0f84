//! Value validator

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::collection::sort_by_order;
use crate::domain::{Field, FieldId};
use crate::validation::compiler::{CompiledRuleSet, RuleCompiler};

fn default_compiler() -> &'static RuleCompiler {
    static COMPILER: OnceLock<RuleCompiler> = OnceLock::new();
    COMPILER.get_or_init(RuleCompiler::default)
}

/// Compile a field's rules with the built-in configuration
pub fn compile_rules(field: &Field) -> CompiledRuleSet {
    default_compiler().compile(field)
}

/// Validate one value against a field.
///
/// Returns every failing message: the required check first, then the
/// field's rules in stored order.
pub fn validate(value: &Value, field: &Field) -> Vec<String> {
    default_compiler().validate(value, field)
}

/// Failing messages for one field of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub field_id: FieldId,
    pub label: String,
    pub errors: Vec<String>,
}

/// Validate a whole submission.
///
/// Display-only fields and fields deactivated by their conditional rule
/// are skipped. A satisfied `require` rule makes its field required.
/// Results are in `order` sequence and only include failing fields.
pub fn validate_submission(
    compiler: &RuleCompiler,
    fields: &[Field],
    values: &HashMap<FieldId, Value>,
) -> Vec<FieldErrors> {
    sort_by_order(fields)
        .iter()
        .filter(|field| !field.field_type.is_display_only() && field.is_active(values))
        .filter_map(|field| {
            let effective = if !field.required && field.is_required(values) {
                let mut required = field.clone();
                required.required = true;
                Cow::Owned(required)
            } else {
                Cow::Borrowed(field)
            };
            let value = values.get(&field.id).cloned().unwrap_or(Value::Null);
            let errors = compiler.validate(&value, &effective);
            (!errors.is_empty()).then(|| FieldErrors {
                field_id: field.id.clone(),
                label: field.label.clone(),
                errors,
            })
        })
        .collect()
}
