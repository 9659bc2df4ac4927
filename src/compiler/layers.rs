//! Top-level assembly of all layers.

use crate::compiler::flags::SublayerFlags;
use crate::compiler::sublayer::compile_sublayer;
use crate::models::{Condition, KeyCode, LayerEntry, LayerSpec, LeafAction, Manipulator, RuleGroup};
use tracing::debug;

/// Compiles every top-level entry of `spec` into one rule group, in order.
///
/// A direct binding becomes a single manipulator gated only on `hyper_flag`.
/// A sublayer is handed to [`compile_sublayer`] together with the flags of
/// all sublayers in the spec.
#[must_use]
pub fn compile_layers(spec: &LayerSpec, hyper_flag: &str) -> Vec<RuleGroup> {
    let all_flags = SublayerFlags::from_spec(spec);

    spec.iter()
        .map(|(key, entry)| {
            let group = match entry {
                LayerEntry::Leaf(action) => RuleGroup::new(
                    format!("Hyper Key + {key}"),
                    vec![direct_manipulator(key, action, hyper_flag)],
                ),
                LayerEntry::Sublayer(mapping) => RuleGroup::new(
                    format!("Hyper Key sublayer \"{key}\""),
                    compile_sublayer(key, mapping, &all_flags, hyper_flag),
                ),
            };
            debug!(
                "Compiled '{}' ({} manipulators)",
                group.description,
                group.manipulators.len()
            );
            group
        })
        .collect()
}

fn direct_manipulator(key: KeyCode, action: &LeafAction, hyper_flag: &str) -> Manipulator {
    let mut manipulator = Manipulator::basic(key);
    manipulator.description = action.label().map(str::to_string);
    manipulator.to = action.effect().to_vec();
    manipulator.conditions = vec![Condition::variable_if(hyper_flag, 1)];
    manipulator
}
