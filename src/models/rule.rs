//! Compiled Karabiner rule structures.
//!
//! These mirror the `complex_modifications` rule schema: a [`RuleGroup`]
//! holds a description and an ordered list of [`Manipulator`]s.

use crate::models::action::OutputAction;
use crate::models::key_code::{KeyCode, Modifier};
use serde::{Deserialize, Serialize};

/// Kind of a variable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Matches when the variable equals the value
    VariableIf,
    /// Matches when the variable differs from the value
    VariableUnless,
}

/// A gating condition attached to a manipulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition type
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    /// Variable name
    pub name: String,
    /// Compared value
    pub value: u8,
}

impl Condition {
    /// `variable_if name = value`
    pub fn variable_if(name: impl Into<String>, value: u8) -> Self {
        Self {
            kind: ConditionKind::VariableIf,
            name: name.into(),
            value,
        }
    }

    /// `variable_unless name = value`
    pub fn variable_unless(name: impl Into<String>, value: u8) -> Self {
        Self {
            kind: ConditionKind::VariableUnless,
            name: name.into(),
            value,
        }
    }
}

/// Modifier constraints of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromModifiers {
    /// Modifiers that may be held without preventing a match
    pub optional: Vec<Modifier>,
}

/// Trigger description of a manipulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromEvent {
    /// Trigger key
    pub key_code: KeyCode,
    /// Modifier constraints
    pub modifiers: FromModifiers,
}

impl FromEvent {
    /// Trigger on `key_code` regardless of held modifiers.
    #[must_use]
    pub fn any_modifiers(key_code: KeyCode) -> Self {
        Self {
            key_code,
            modifiers: FromModifiers {
                optional: vec![Modifier::Any],
            },
        }
    }
}

/// Manipulator type. Only `basic` is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorKind {
    /// A plain key-to-actions manipulator
    #[default]
    Basic,
}

/// A single remapping rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Optional description shown in the Karabiner UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Manipulator type
    #[serde(rename = "type")]
    pub kind: ManipulatorKind,
    /// Trigger
    pub from: FromEvent,
    /// Actions on key down
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<OutputAction>,
    /// Actions on key up
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_after_key_up: Vec<OutputAction>,
    /// Actions when pressed and released alone
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<OutputAction>,
    /// Gating conditions, all of which must hold
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Creates a basic manipulator triggered by `key_code` with any modifiers
    /// and no outputs or conditions yet.
    #[must_use]
    pub fn basic(key_code: KeyCode) -> Self {
        Self {
            description: None,
            kind: ManipulatorKind::Basic,
            from: FromEvent::any_modifiers(key_code),
            to: Vec::new(),
            to_after_key_up: Vec::new(),
            to_if_alone: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Returns true if a `variable_if name = value` condition is present.
    #[must_use]
    pub fn requires(&self, name: &str, value: u8) -> bool {
        self.conditions
            .iter()
            .any(|c| c.kind == ConditionKind::VariableIf && c.name == name && c.value == value)
    }
}

/// A described group of manipulators (one Karabiner "rule").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    /// Group description
    pub description: String,
    /// Manipulators in output order
    pub manipulators: Vec<Manipulator>,
}

impl RuleGroup {
    /// Creates a group from its description and manipulators.
    pub fn new(description: impl Into<String>, manipulators: Vec<Manipulator>) -> Self {
        Self {
            description: description.into(),
            manipulators,
        }
    }
}
