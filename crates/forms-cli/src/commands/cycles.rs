//! Cycle report command

use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use super::load_fields;
use crate::output::{cell, OutputFormat};
use forms_engine::{cycle_warnings, find_cycles, Field, FieldId};

/// Cycles reachable from one field, keyed by id
#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub field: FieldId,
    pub label: String,
    pub cycles: Vec<Vec<FieldId>>,
}

#[derive(Tabled)]
struct CycleRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Cycle")]
    cycle: String,
}

/// Cycles for one field, or for every field when `only` is `None`
pub fn report(fields: &[Field], only: Option<&str>) -> anyhow::Result<Vec<CycleReport>> {
    match only {
        Some(id) => {
            let id = FieldId::from(id);
            let field = fields
                .iter()
                .find(|f| f.id == id)
                .with_context(|| format!("field {id} not found"))?;
            let cycles = find_cycles(field, fields);
            Ok(if cycles.is_empty() {
                Vec::new()
            } else {
                vec![CycleReport { field: field.id.clone(), label: field.label.clone(), cycles }]
            })
        }
        None => Ok(cycle_warnings(fields)
            .into_iter()
            .map(|w| CycleReport {
                field: w.field.id.clone(),
                label: w.field.label.clone(),
                cycles: w.cycles,
            })
            .collect()),
    }
}

pub fn handle(file: &Path, only: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let fields = load_fields(file)?;
    let reports = report(&fields, only)?;
    if reports.is_empty() {
        tracing::info!("no dependency cycles");
    }

    format.print(&reports, |reports| {
        reports
            .iter()
            .flat_map(|r| {
                r.cycles.iter().map(|cycle| CycleRow {
                    field: r.field.to_string(),
                    cycle: format!("{} -> {}", cell(cycle), cycle[0]),
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_engine::{create_field, ConditionalOperator, ConditionalRule, FieldType};
    use serde_json::Value;

    fn field_on(id: &str, trigger: Option<&str>) -> Field {
        let mut f = create_field(FieldType::Text, 0);
        f.id = FieldId::from(id);
        f.conditional =
            trigger.map(|t| ConditionalRule::show_when(t, ConditionalOperator::IsNotEmpty, Value::Null));
        f
    }

    #[test]
    fn test_report_all_and_single() {
        let fields = vec![field_on("a", Some("b")), field_on("b", Some("a")), field_on("c", None)];

        let all = report(&fields, None).unwrap();
        assert_eq!(all.len(), 2);

        let single = report(&fields, Some("b")).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].cycles, vec![vec![FieldId::from("b"), FieldId::from("a")]]);

        assert!(report(&fields, Some("c")).unwrap().is_empty());
        assert!(report(&fields, Some("zzz")).is_err());
    }
}
