//! The global modifier rule.

use crate::config::HyperConfig;
use crate::models::{Manipulator, OutputAction, RuleGroup};

/// Builds the always-on rule turning the configured trigger key into the
/// hyper flag: 1 while held, 0 after release, and the alone key when tapped.
#[must_use]
pub fn hyper_rule(settings: &HyperConfig) -> RuleGroup {
    let mut manipulator = Manipulator::basic(settings.trigger_key);
    manipulator.description = Some(format!("{} -> Hyper Key", settings.trigger_key));
    manipulator.to = vec![OutputAction::set_variable(&settings.variable, 1)];
    manipulator.to_after_key_up = vec![OutputAction::set_variable(&settings.variable, 0)];
    if settings.tap_alone {
        manipulator.to_if_alone = vec![OutputAction::key(settings.alone_key, &[])];
    }

    RuleGroup::new("Hyper Key (⌃⌥⇧⌘)", vec![manipulator])
}
