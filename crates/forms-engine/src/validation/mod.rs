//! Validation rule compilation and value validation

pub mod compiler;
pub mod messages;
pub mod validator;

pub use compiler::{Check, CompiledCheck, CompiledRuleSet, CustomPredicate, RuleCompiler};
pub use messages::default_message;
pub use validator::{compile_rules, validate, validate_submission, FieldErrors};
