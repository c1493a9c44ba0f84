//! Dependency graph builder
//!
//! An edge `A -> B` means A's conditional rule reads B's value. The graph is
//! derived from the field collection on every call and never cached.

use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::domain::{Field, FieldId};

/// Field id to the ordered, de-duplicated ids of its trigger fields
pub type DependencyMap = BTreeMap<FieldId, Vec<FieldId>>;

/// Resolves the trigger fields of a field's conditional rule
pub trait TriggerResolver {
    /// Ids referenced by `field`'s conditional rule, in reference order,
    /// without repeats. Empty when the field has no rule.
    fn trigger_fields(&self, field: &Field, all_fields: &[Field]) -> Vec<FieldId>;
}

/// Trigger resolution over [`ConditionalRule`](crate::domain::ConditionalRule)
/// conditions. References to ids missing from the collection are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionTriggers;

impl TriggerResolver for ConditionTriggers {
    fn trigger_fields(&self, field: &Field, all_fields: &[Field]) -> Vec<FieldId> {
        let Some(rule) = &field.conditional else {
            return Vec::new();
        };
        let known: HashSet<&FieldId> = all_fields.iter().map(|f| &f.id).collect();
        rule.referenced_fields()
            .into_iter()
            .filter(|id| known.contains(id))
            .collect()
    }
}

/// Trigger fields of `field` within `all_fields`
pub fn get_trigger_fields(field: &Field, all_fields: &[Field]) -> Vec<FieldId> {
    ConditionTriggers.trigger_fields(field, all_fields)
}

/// Build the dependency map of a collection.
///
/// Fields without a conditional rule, or whose triggers resolve to nothing,
/// are left out.
pub fn build_dependency_map(fields: &[Field]) -> DependencyMap {
    build_dependency_map_with(&ConditionTriggers, fields)
}

/// [`build_dependency_map`] with a custom trigger resolver
pub fn build_dependency_map_with<R>(resolver: &R, fields: &[Field]) -> DependencyMap
where
    R: TriggerResolver + ?Sized,
{
    let map: DependencyMap = fields
        .iter()
        .filter(|field| field.conditional.is_some())
        .filter_map(|field| {
            let triggers = resolver.trigger_fields(field, fields);
            (!triggers.is_empty()).then(|| (field.id.clone(), triggers))
        })
        .collect();
    debug!(fields = fields.len(), dependent = map.len(), "built dependency map");
    map
}

/// Ids of fields whose conditional rule reads `id`, in collection order
pub fn dependents_of(fields: &[Field], id: &FieldId) -> Vec<FieldId> {
    let map = build_dependency_map(fields);
    fields
        .iter()
        .filter(|f| map.get(&f.id).is_some_and(|triggers| triggers.contains(id)))
        .map(|f| f.id.clone())
        .collect()
}

/// `(field, missing_id)` pairs for conditions that name a field not in the
/// collection
pub fn dangling_references(fields: &[Field]) -> Vec<(FieldId, FieldId)> {
    let known: HashSet<&FieldId> = fields.iter().map(|f| &f.id).collect();
    fields
        .iter()
        .filter_map(|f| f.conditional.as_ref().map(|rule| (f, rule)))
        .flat_map(|(f, rule)| {
            rule.referenced_fields()
                .into_iter()
                .filter(|id| !known.contains(id))
                .map(|missing| (f.id.clone(), missing))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, ConditionLogic, ConditionalAction, ConditionalOperator, ConditionalRule, FieldType};
    use crate::factory::create_field;
    use serde_json::{json, Value};

    fn field_on(id: &str, triggers: &[&str]) -> Field {
        let mut f = create_field(FieldType::Text, 0);
        f.id = FieldId::from(id);
        if !triggers.is_empty() {
            let mut rule = ConditionalRule::new(ConditionalAction::Show, ConditionLogic::Any);
            for t in triggers {
                rule = rule.with_condition(Condition::new(*t, ConditionalOperator::IsNotEmpty, Value::Null));
            }
            f.conditional = Some(rule);
        }
        f
    }

    #[test]
    fn test_mutual_dependency_map() {
        let fields = vec![field_on("1", &["2"]), field_on("2", &["1"])];
        let map = build_dependency_map(&fields);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&FieldId::from("1")], vec![FieldId::from("2")]);
        assert_eq!(map[&FieldId::from("2")], vec![FieldId::from("1")]);
    }

    #[test]
    fn test_fields_without_rules_are_omitted() {
        let mut empty_rule = field_on("c", &[]);
        empty_rule.conditional = Some(ConditionalRule::default());
        let fields = vec![field_on("a", &[]), field_on("b", &["a"]), empty_rule];
        let map = build_dependency_map(&fields);
        assert!(!map.contains_key(&FieldId::from("a")));
        assert!(!map.contains_key(&FieldId::from("c")));
        assert!(map.contains_key(&FieldId::from("b")));
    }

    #[test]
    fn test_triggers_ordered_and_deduplicated() {
        let fields = vec![
            field_on("a", &[]),
            field_on("b", &[]),
            field_on("c", &["b", "a", "b"]),
        ];
        assert_eq!(
            get_trigger_fields(&fields[2], &fields),
            vec![FieldId::from("b"), FieldId::from("a")]
        );
    }

    #[test]
    fn test_unknown_triggers_are_dropped() {
        let fields = vec![field_on("a", &["ghost"]), field_on("b", &["ghost", "a"])];
        let map = build_dependency_map(&fields);
        assert!(!map.contains_key(&FieldId::from("a")));
        assert_eq!(map[&FieldId::from("b")], vec![FieldId::from("a")]);
        assert_eq!(
            dangling_references(&fields),
            vec![
                (FieldId::from("a"), FieldId::from("ghost")),
                (FieldId::from("b"), FieldId::from("ghost")),
            ]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let fields = vec![field_on("x", &["y", "z"]), field_on("y", &["z"]), field_on("z", &[])];
        assert_eq!(build_dependency_map(&fields), build_dependency_map(&fields));
    }

    #[test]
    fn test_dependents_of() {
        let fields = vec![field_on("a", &[]), field_on("b", &["a"]), field_on("c", &["b", "a"])];
        assert_eq!(
            dependents_of(&fields, &FieldId::from("a")),
            vec![FieldId::from("b"), FieldId::from("c")]
        );
        assert!(dependents_of(&fields, &FieldId::from("c")).is_empty());
    }

    #[test]
    fn test_custom_resolver() {
        struct Everything;
        impl TriggerResolver for Everything {
            fn trigger_fields(&self, field: &Field, all: &[Field]) -> Vec<FieldId> {
                all.iter().filter(|f| f.id != field.id).map(|f| f.id.clone()).collect()
            }
        }
        let mut a = field_on("a", &[]);
        a.conditional = Some(ConditionalRule::show_when("b", ConditionalOperator::Equals, json!(1)));
        let fields = vec![a, field_on("b", &[])];
        let map = build_dependency_map_with(&Everything, &fields);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&FieldId::from("a")], vec![FieldId::from("b")]);
    }
}
