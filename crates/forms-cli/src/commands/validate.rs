//! Submission validation command

use anyhow::bail;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tabled::Tabled;

use super::{load_fields, read_document};
use crate::output::{cell, OutputFormat};
use forms_engine::{validate_submission, EngineConfig, FieldId, RuleCompiler};

#[derive(Tabled)]
struct ErrorRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Errors")]
    errors: String,
}

/// Load submitted values keyed by field id
pub fn load_values(path: &Path) -> anyhow::Result<HashMap<FieldId, Value>> {
    read_document(path)
}

pub fn handle(
    file: &Path,
    values: &Path,
    engine: &EngineConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let fields = load_fields(file)?;
    let values = load_values(values)?;
    let compiler = RuleCompiler::new(engine)?;
    let report = validate_submission(&compiler, &fields, &values);

    format.print(&report, |report| {
        report
            .iter()
            .map(|r| ErrorRow {
                field: r.field_id.to_string(),
                label: r.label.clone(),
                errors: cell(&r.errors),
            })
            .collect()
    })?;

    if !report.is_empty() {
        bail!("{} field(s) failed validation", report.len());
    }
    Ok(())
}
