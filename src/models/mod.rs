//! Data models for layer definitions and compiled rules.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are independent of file formats, the CLI and the compiler.

pub mod action;
pub mod key_code;
pub mod layer_spec;
pub mod rule;

// Re-export all model types
pub use action::{LeafAction, OutputAction, VariableAssignment};
pub use key_code::{KeyCode, Modifier};
pub use layer_spec::{LayerEntry, LayerSpec, SublayerMapping};
pub use rule::{
    Condition, ConditionKind, FromEvent, FromModifiers, Manipulator, ManipulatorKind, RuleGroup,
};
