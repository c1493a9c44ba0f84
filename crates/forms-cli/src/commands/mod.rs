//! CLI Commands

pub mod check;
pub mod cycles;
pub mod deps;
pub mod new;
pub mod validate;

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use forms_engine::{fields_from_json, Field};

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Read a JSON or YAML document, chosen by file extension
fn read_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = read_text(path)?;
    if is_yaml(path) {
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Load a field collection
pub fn load_fields(path: &Path) -> anyhow::Result<Vec<Field>> {
    let fields: Vec<Field> = if is_yaml(path) {
        read_document(path)?
    } else {
        fields_from_json(&read_text(path)?).with_context(|| format!("parsing {}", path.display()))?
    };
    tracing::debug!(count = fields.len(), path = %path.display(), "loaded fields");
    Ok(fields)
}
