//! Default validation messages

use crate::config::MessageTemplates;
use crate::domain::RuleType;

/// Default message for `rule_type`, with `{label}` and `{value}` expanded
pub fn default_message(
    templates: &MessageTemplates,
    rule_type: RuleType,
    label: &str,
    value: Option<&str>,
) -> String {
    render(templates.template_for(rule_type), label, value)
}

fn render(template: &str, label: &str, value: Option<&str>) -> String {
    template
        .replace("{label}", label)
        .replace("{value}", value.unwrap_or_default())
}
