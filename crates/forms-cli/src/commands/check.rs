//! Check command

use anyhow::bail;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use super::load_fields;
use crate::output::{cell, OutputFormat};
use forms_engine::graph::dangling_references;
use forms_engine::{
    sort_by_order, validate_field_config, EngineConfig, Field, FieldId, FieldType, RuleCompiler,
    StructuralError,
};

/// Configuration findings for one field
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCheck {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub valid: bool,
    pub errors: Vec<StructuralError>,
    /// Malformed validation rules, skipped at compile time
    pub rule_errors: Vec<String>,
    /// Condition references to ids missing from the collection
    pub unknown_triggers: Vec<FieldId>,
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Field")]
    id: String,
    #[tabled(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Valid")]
    valid: bool,
    #[tabled(rename = "Errors")]
    errors: String,
    #[tabled(rename = "Rule errors")]
    rule_errors: String,
    #[tabled(rename = "Unknown triggers")]
    unknown_triggers: String,
}

pub fn report(fields: &[Field], compiler: &RuleCompiler) -> Vec<FieldCheck> {
    let dangling = dangling_references(fields);
    sort_by_order(fields)
        .into_iter()
        .map(|field| {
            let structure = validate_field_config(&field);
            let rule_errors: Vec<String> =
                compiler.compile(&field).errors.iter().map(ToString::to_string).collect();
            let unknown_triggers: Vec<FieldId> = dangling
                .iter()
                .filter(|(owner, _)| *owner == field.id)
                .map(|(_, missing)| missing.clone())
                .collect();
            FieldCheck {
                valid: structure.valid && rule_errors.is_empty() && unknown_triggers.is_empty(),
                id: field.id,
                label: field.label,
                field_type: field.field_type,
                errors: structure.errors,
                rule_errors,
                unknown_triggers,
            }
        })
        .collect()
}

pub fn handle(file: &Path, engine: &EngineConfig, format: OutputFormat) -> anyhow::Result<()> {
    let fields = load_fields(file)?;
    let compiler = RuleCompiler::new(engine)?;
    let checks = report(&fields, &compiler);

    format.print(&checks, |checks| {
        checks
            .iter()
            .map(|c| CheckRow {
                id: c.id.to_string(),
                field_type: c.field_type.to_string(),
                valid: c.valid,
                errors: cell(&c.errors),
                rule_errors: cell(&c.rule_errors),
                unknown_triggers: cell(&c.unknown_triggers),
            })
            .collect()
    })?;

    let failing = checks.iter().filter(|c| !c.valid).count();
    if failing > 0 {
        bail!("{failing} of {} fields failed the check", checks.len());
    }
    Ok(())
}
