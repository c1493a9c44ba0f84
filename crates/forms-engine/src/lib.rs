//! OpenSASE Forms Engine
//!
//! Field model and rule engine behind the form builder.
//!
//! ## Architecture
//!
//! - **Domain**: field aggregate, value objects, conditional rules, metadata
//! - **Factory**: type-specific defaults for new and cloned fields
//! - **Collection**: immutable edits over an ordered field list
//! - **Validation**: declarative rules compiled into checks
//! - **Graph**: conditional dependencies and cycle detection
//!
//! ## Features
//!
//! - 21 field types with per-type defaults
//! - Required, length, pattern and format checks with templated messages
//! - Show/hide/require conditional logic
//! - Dependency cycle warnings for the builder UI
//! - TOML configuration for patterns, messages and factory defaults

pub mod collection;
pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod graph;
pub mod validation;
pub mod value;

// Re-exports for convenience
pub use collection::{
    duplicate_field, fields_from_json, insert_field, remove_field, reorder_field, sort_by_order,
    update_field, validate_field_config, FieldConfigReport,
};
pub use config::{EngineConfig, FactoryConfig, FormatPatterns, MessageTemplates};
pub use domain::{
    Condition, ConditionLogic, ConditionalAction, ConditionalOperator, ConditionalRule, Field,
    FieldId, FieldMetadata, FieldOption, FieldType, FieldUpdate, MetadataUpdate, RuleType,
    TypeMetadata, ValidationRule,
};
pub use error::{FormsError, Result, RuleConfigError, RuleConfigErrorKind, StructuralError};
pub use factory::{clone_field, create_field, FieldFactory};
pub use graph::{
    build_dependency_map, cycle_warnings, find_cycles, get_trigger_fields, CycleWarning,
    DependencyMap, TriggerResolver,
};
pub use validation::{
    compile_rules, validate, validate_submission, CompiledRuleSet, FieldErrors, RuleCompiler,
};
