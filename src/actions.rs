//! Builders for common leaf actions.
//!
//! Each builder returns a ready [`LeafAction`]; none of them touch any state.

use crate::models::{KeyCode, LeafAction, Modifier, OutputAction};

/// Runs `open <what>` (URLs, deep links, `-a` application names).
pub fn open(what: &str) -> LeafAction {
    LeafAction::new(vec![OutputAction::shell(format!("open {what}"))])
        .with_label(format!("Open {what}"))
}

/// Launches or focuses `<name>.app`.
pub fn app(name: &str) -> LeafAction {
    open(&format!("-a '{name}.app'"))
}

/// Runs a Rectangle window-management action in the background.
pub fn window(name: &str) -> LeafAction {
    LeafAction::new(vec![OutputAction::shell(format!(
        "open -g rectangle://execute-action?name={name}"
    ))])
    .with_label(format!("Window: {name}"))
}

/// Emits a key chord.
pub fn key(key_code: KeyCode, modifiers: &[Modifier]) -> LeafAction {
    LeafAction::new(vec![OutputAction::key(key_code, modifiers)])
}

/// Runs an arbitrary shell command.
pub fn shell(command: &str) -> LeafAction {
    LeafAction::new(vec![OutputAction::shell(command)])
}
