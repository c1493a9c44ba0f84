//! New field command

use tabled::Tabled;

use crate::output::OutputFormat;
use forms_engine::{EngineConfig, FieldFactory, FieldType};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Placeholder")]
    placeholder: String,
    #[tabled(rename = "Options")]
    options: usize,
    #[tabled(rename = "Order")]
    order: usize,
}

pub fn handle(kind: &str, order: usize, engine: &EngineConfig, format: OutputFormat) -> anyhow::Result<()> {
    let kind: FieldType = kind.parse()?;
    if kind == FieldType::Unknown {
        tracing::warn!("unrecognised field type, using generic defaults");
    }
    let field = FieldFactory::new(engine.factory.clone()).create(kind, order);

    format.print(&field, |field| {
        vec![FieldRow {
            id: field.id.to_string(),
            field_type: field.field_type.to_string(),
            label: field.label.clone(),
            placeholder: field.placeholder.clone(),
            options: field.options.as_ref().map_or(0, Vec::len),
            order: field.order,
        }]
    })
}
