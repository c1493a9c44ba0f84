//! Dependency map command

use std::path::Path;
use tabled::Tabled;

use super::load_fields;
use crate::output::{cell, OutputFormat};
use forms_engine::build_dependency_map;

#[derive(Tabled)]
struct DependencyRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Depends on")]
    triggers: String,
}

pub fn handle(file: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let fields = load_fields(file)?;
    let map = build_dependency_map(&fields);

    format.print(&map, |map| {
        map.iter()
            .map(|(field, triggers)| DependencyRow {
                field: field.to_string(),
                triggers: cell(triggers),
            })
            .collect()
    })
}
