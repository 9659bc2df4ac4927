//! Output actions and leaf actions.
//!
//! An [`OutputAction`] is one entry of a Karabiner `to` list. A
//! [`LeafAction`] bundles the actions a single key binding performs with an
//! optional human-readable label.

use crate::models::key_code::{KeyCode, Modifier};
use serde::{Deserialize, Serialize};

/// Assignment of a value to a Karabiner variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableAssignment {
    /// Variable name (e.g., "hyper", "sublayer_o")
    pub name: String,
    /// Assigned value (0 or 1 for flags)
    pub value: u8,
}

/// One output action of a remapping rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputAction {
    /// `{ "set_variable": { "name": ..., "value": ... } }`
    SetVariable {
        /// The assignment to perform
        set_variable: VariableAssignment,
    },
    /// `{ "shell_command": "..." }`
    ShellCommand {
        /// Command line passed to the shell
        shell_command: String,
    },
    /// `{ "key_code": "...", "modifiers": [...] }`
    Key {
        /// Key to emit
        key_code: KeyCode,
        /// Modifiers held while emitting the key
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modifiers: Vec<Modifier>,
    },
}

impl OutputAction {
    /// Creates a `set_variable` action.
    pub fn set_variable(name: impl Into<String>, value: u8) -> Self {
        Self::SetVariable {
            set_variable: VariableAssignment {
                name: name.into(),
                value,
            },
        }
    }

    /// Creates a `shell_command` action.
    pub fn shell(command: impl Into<String>) -> Self {
        Self::ShellCommand {
            shell_command: command.into(),
        }
    }

    /// Creates a key press action with optional modifiers.
    pub fn key(key_code: KeyCode, modifiers: &[Modifier]) -> Self {
        Self::Key {
            key_code,
            modifiers: modifiers.to_vec(),
        }
    }
}

/// What a single key binding does: its effect plus an optional label.
///
/// Leaf actions are immutable once built; use the builder functions in
/// [`crate::actions`] or [`LeafAction::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafAction {
    #[serde(rename = "to")]
    effect: Vec<OutputAction>,
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl LeafAction {
    /// Creates an unlabeled leaf action from its output actions.
    pub fn new(effect: impl Into<Vec<OutputAction>>) -> Self {
        Self {
            effect: effect.into(),
            label: None,
        }
    }

    /// Returns a copy carrying the given label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The ordered output actions.
    #[must_use]
    pub fn effect(&self) -> &[OutputAction] {
        &self.effect
    }

    /// The label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
