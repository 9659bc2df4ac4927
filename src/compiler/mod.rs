//! Rule compilation and pre-compilation validation.
//!
//! This module turns a [`LayerSpec`] into Karabiner rule groups: the hyper
//! key rule followed by one group per top-level entry.

pub mod flags;
pub mod hyper;
pub mod layers;
pub mod sublayer;
pub mod validator;

pub use flags::{sublayer_flag_name, SublayerFlags};
pub use hyper::hyper_rule;
pub use layers::compile_layers;
pub use sublayer::compile_sublayer;
pub use validator::LayerValidator;

use crate::config::HyperConfig;
use crate::models::{LayerSpec, RuleGroup};
use tracing::debug;

/// Compiles a layer spec with the given hyper key settings.
pub struct RuleCompiler<'a> {
    spec: &'a LayerSpec,
    hyper: &'a HyperConfig,
}

impl<'a> RuleCompiler<'a> {
    /// Creates a compiler over `spec`.
    #[must_use]
    pub const fn new(spec: &'a LayerSpec, hyper: &'a HyperConfig) -> Self {
        Self { spec, hyper }
    }

    /// Rule groups for the spec's entries only, without the hyper rule.
    #[must_use]
    pub fn compile_layers(&self) -> Vec<RuleGroup> {
        compile_layers(self.spec, &self.hyper.variable)
    }

    /// The complete rule list: hyper rule first, then every layer group.
    #[must_use]
    pub fn compile(&self) -> Vec<RuleGroup> {
        let mut rules = Vec::with_capacity(self.spec.len() + 1);
        rules.push(hyper_rule(self.hyper));
        rules.extend(self.compile_layers());

        debug!(
            "Compiled {} rule groups ({} sublayers)",
            rules.len(),
            self.spec.sublayers().count()
        );
        rules
    }
}
