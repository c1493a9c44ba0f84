//! Field collection operations
//!
//! Every operation takes the current collection by reference and returns a
//! fresh one. After any insert, remove or reorder, `order` values are
//! renumbered densely from 0 in sequence order.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Field, FieldId, FieldType, FieldUpdate};
use crate::error::{FormsError, Result, StructuralError};
use crate::factory::clone_field;

/// Merge `update` into the field with `id`. Other fields are copied as-is.
pub fn update_field(fields: &[Field], id: &FieldId, update: &FieldUpdate) -> Vec<Field> {
    fields
        .iter()
        .map(|f| if &f.id == id { f.apply(update) } else { f.clone() })
        .collect()
}

/// Drop the field with `id` and renumber the survivors
pub fn remove_field(fields: &[Field], id: &FieldId) -> Vec<Field> {
    renumber(fields.iter().filter(|f| &f.id != id).cloned().collect())
}

/// Move the field at `from` to position `to` and renumber.
///
/// Both indices must address existing positions.
pub fn reorder_field(fields: &[Field], from: usize, to: usize) -> Result<Vec<Field>> {
    let len = fields.len();
    for index in [from, to] {
        if index >= len {
            return Err(FormsError::IndexOutOfRange { index, len });
        }
    }
    let mut next = fields.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    debug!(from, to, "reordered field");
    Ok(renumber(next))
}

/// Insert `field` at `index` (`index == len` appends) and renumber
pub fn insert_field(fields: &[Field], field: Field, index: usize) -> Result<Vec<Field>> {
    let len = fields.len();
    if index > len {
        return Err(FormsError::IndexOutOfRange { index, len });
    }
    let mut next = fields.to_vec();
    next.insert(index, field);
    Ok(renumber(next))
}

/// Clone the field with `id` and place the copy right after it
pub fn duplicate_field(fields: &[Field], id: &FieldId) -> Result<Vec<Field>> {
    let position = fields
        .iter()
        .position(|f| &f.id == id)
        .ok_or_else(|| FormsError::FieldNotFound(id.clone()))?;
    insert_field(fields, clone_field(&fields[position]), position + 1)
}

/// Collection sorted by `order`, ties kept in sequence order
pub fn sort_by_order(fields: &[Field]) -> Vec<Field> {
    let mut sorted = fields.to_vec();
    sorted.sort_by_key(|f| f.order);
    sorted
}

/// Parse a JSON field collection.
///
/// Missing or unrecognised `type` names load as [`FieldType::Unknown`] so
/// [`validate_field_config`] can report them.
pub fn fields_from_json(source: &str) -> Result<Vec<Field>> {
    let fields: Vec<Field> = serde_json::from_str(source)?;
    debug!(count = fields.len(), "parsed field collection");
    Ok(fields)
}

fn renumber(mut fields: Vec<Field>) -> Vec<Field> {
    for (index, field) in fields.iter_mut().enumerate() {
        field.order = index;
    }
    fields
}

/// Result of a structural configuration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldConfigReport {
    pub valid: bool,
    pub errors: Vec<StructuralError>,
}

/// Check a field's configuration (not its value).
///
/// Flags a blank label, a missing type and an option-accepting field with
/// no options.
pub fn validate_field_config(field: &Field) -> FieldConfigReport {
    let mut errors = Vec::new();

    // Display-only kinds still need a label: it is their content.
    if field.label.trim().is_empty() {
        errors.push(StructuralError::MissingLabel);
    }
    if field.field_type == FieldType::Unknown {
        errors.push(StructuralError::MissingType);
    }
    if field.field_type.accepts_options() && field.options.as_ref().map_or(true, Vec::is_empty) {
        errors.push(StructuralError::MissingOptions);
    }

    FieldConfigReport { valid: errors.is_empty(), errors }
}
