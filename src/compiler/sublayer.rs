//! Compilation of a single sublayer.

use crate::compiler::flags::{sublayer_flag_name, SublayerFlags};
use crate::models::{Condition, KeyCode, Manipulator, OutputAction, SublayerMapping};

/// Compiles one sublayer into its toggle manipulator followed by one
/// manipulator per binding.
///
/// The toggle sets `sublayer_<trigger_key>` to 1 on press and back to 0 on
/// release. It only matches while `hyper_flag` is 1 and every *other* flag in
/// `all_flags` is 0, so no two sublayers can be active at once. Each binding
/// matches only while this sublayer's own flag is 1.
///
/// `all_flags` must contain this sublayer's own flag.
#[must_use]
pub fn compile_sublayer(
    trigger_key: KeyCode,
    mapping: &SublayerMapping,
    all_flags: &SublayerFlags,
    hyper_flag: &str,
) -> Vec<Manipulator> {
    let flag = sublayer_flag_name(trigger_key);
    debug_assert!(
        all_flags.contains(&flag),
        "flag set is missing {flag}; sibling exclusion would be incomplete"
    );

    let mut manipulators = Vec::with_capacity(mapping.len() + 1);
    manipulators.push(toggle_manipulator(trigger_key, &flag, all_flags, hyper_flag));

    for (key, action) in mapping.iter() {
        let mut manipulator = Manipulator::basic(key);
        manipulator.description = action.label().map(str::to_string);
        manipulator.to = action.effect().to_vec();
        manipulator.conditions = vec![Condition::variable_if(&flag, 1)];
        manipulators.push(manipulator);
    }

    manipulators
}

fn toggle_manipulator(
    trigger_key: KeyCode,
    flag: &str,
    all_flags: &SublayerFlags,
    hyper_flag: &str,
) -> Manipulator {
    let mut conditions: Vec<Condition> = all_flags
        .others(flag)
        .map(|other| Condition::variable_if(other, 0))
        .collect();
    conditions.push(Condition::variable_if(hyper_flag, 1));

    let mut toggle = Manipulator::basic(trigger_key);
    toggle.description = Some(format!("Toggle Hyper sublayer {trigger_key}"));
    toggle.to = vec![OutputAction::set_variable(flag, 1)];
    toggle.to_after_key_up = vec![OutputAction::set_variable(flag, 0)];
    toggle.conditions = conditions;
    toggle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{app, key, open};
    use crate::models::ConditionKind;

    fn open_layer() -> SublayerMapping {
        let mut mapping = SublayerMapping::new();
        mapping.insert(KeyCode::G, app("Google Chrome")).unwrap();
        mapping.insert(KeyCode::S, app("Slack")).unwrap();
        mapping
    }

    #[test]
    fn test_toggle_comes_first_then_bindings_in_order() {
        let flags = SublayerFlags::from_keys([KeyCode::O]);
        let manipulators = compile_sublayer(KeyCode::O, &open_layer(), &flags, "hyper");

        assert_eq!(manipulators.len(), 3);
        assert_eq!(manipulators[0].from.key_code, KeyCode::O);
        assert_eq!(manipulators[1].from.key_code, KeyCode::G);
        assert_eq!(manipulators[2].from.key_code, KeyCode::S);
    }

    #[test]
    fn test_toggle_sets_and_clears_flag() {
        let flags = SublayerFlags::from_keys([KeyCode::O]);
        let toggle = &compile_sublayer(KeyCode::O, &open_layer(), &flags, "hyper")[0];

        assert_eq!(toggle.to, vec![OutputAction::set_variable("sublayer_o", 1)]);
        assert_eq!(
            toggle.to_after_key_up,
            vec![OutputAction::set_variable("sublayer_o", 0)]
        );
        assert!(toggle.to_if_alone.is_empty());
        assert_eq!(
            toggle.description.as_deref(),
            Some("Toggle Hyper sublayer o")
        );
    }

    #[test]
    fn test_toggle_excludes_every_sibling() {
        let flags = SublayerFlags::from_keys([KeyCode::B, KeyCode::O, KeyCode::W]);
        let toggle = &compile_sublayer(KeyCode::O, &open_layer(), &flags, "hyper")[0];

        assert_eq!(
            toggle.conditions,
            vec![
                Condition::variable_if("sublayer_b", 0),
                Condition::variable_if("sublayer_w", 0),
                Condition::variable_if("hyper", 1),
            ]
        );
        assert!(!toggle.conditions.iter().any(|c| c.name == "sublayer_o"));
    }

    #[test]
    fn test_bindings_are_self_gated() {
        let flags = SublayerFlags::from_keys([KeyCode::B, KeyCode::O, KeyCode::W]);
        let manipulators = compile_sublayer(KeyCode::O, &open_layer(), &flags, "hyper");

        for binding in &manipulators[1..] {
            assert_eq!(binding.conditions, vec![Condition::variable_if("sublayer_o", 1)]);
            assert_eq!(binding.conditions[0].kind, ConditionKind::VariableIf);
        }
    }

    #[test]
    fn test_binding_carries_effect_and_label() {
        let mut mapping = SublayerMapping::new();
        mapping
            .insert(KeyCode::T, open("https://twitter.com"))
            .unwrap();
        mapping
            .insert(KeyCode::H, key(KeyCode::LeftArrow, &[]))
            .unwrap();

        let flags = SublayerFlags::from_keys([KeyCode::B]);
        let manipulators = compile_sublayer(KeyCode::B, &mapping, &flags, "hyper");

        assert_eq!(
            manipulators[1].to,
            vec![OutputAction::shell("open https://twitter.com")]
        );
        assert_eq!(
            manipulators[1].description.as_deref(),
            Some("Open https://twitter.com")
        );
        assert_eq!(manipulators[2].description, None);
        assert_eq!(
            manipulators[2].to,
            vec![OutputAction::key(KeyCode::LeftArrow, &[])]
        );
    }

    #[test]
    fn test_empty_sublayer_yields_only_toggle() {
        let flags = SublayerFlags::from_keys([KeyCode::X]);
        let manipulators = compile_sublayer(KeyCode::X, &SublayerMapping::new(), &flags, "hyper");

        assert_eq!(manipulators.len(), 1);
        assert_eq!(manipulators[0].conditions, vec![Condition::variable_if("hyper", 1)]);
    }

    #[test]
    fn test_custom_hyper_flag() {
        let flags = SublayerFlags::from_keys([KeyCode::X]);
        let toggle = &compile_sublayer(KeyCode::X, &SublayerMapping::new(), &flags, "meh")[0];
        assert!(toggle.requires("meh", 1));
        assert!(!toggle.requires("hyper", 1));
    }
}
