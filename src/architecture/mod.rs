pub mod component;
pub mod simulator;

pub use component::{ComponentKind, ComponentSpec};
pub use simulator::{
    propagate_sizes, simulate, validate_chain, Severity, SimulationResult, ValidationIssue,
};
