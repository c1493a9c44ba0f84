//! Dependency graph and cycle detection over conditional rules

pub mod cycles;
pub mod dependency;

pub use cycles::{cycle_warnings, cycle_warnings_with, find_cycles, find_cycles_with, CycleWarning};
pub use dependency::{
    build_dependency_map, build_dependency_map_with, dangling_references, dependents_of,
    get_trigger_fields, ConditionTriggers, DependencyMap, TriggerResolver,
};
