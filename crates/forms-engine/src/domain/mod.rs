//! Domain module
//!
//! Field model: the field aggregate, its value objects, conditional rules
//! and kind-specific metadata.

pub mod conditional;
pub mod field;
pub mod metadata;
pub mod value_objects;

pub use conditional::{Condition, ConditionLogic, ConditionalAction, ConditionalOperator, ConditionalRule};
pub use field::{Field, FieldUpdate};
pub use metadata::{
    AddressLabels, AppointmentInterval, FieldMetadata, HeadingSize, MetadataUpdate, TypeMetadata,
};
pub use value_objects::*;
