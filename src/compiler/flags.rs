//! Sublayer flag naming.

use crate::constants::SUBLAYER_FLAG_PREFIX;
use crate::models::{KeyCode, LayerSpec};

/// Name of the flag variable that is 1 while sublayer `key` is held.
#[must_use]
pub fn sublayer_flag_name(key: KeyCode) -> String {
    format!("{SUBLAYER_FLAG_PREFIX}{key}")
}

/// The set of every sublayer flag of one spec.
///
/// Read-only context handed to each sublayer compilation so a toggle rule can
/// exclude all of its siblings. Names are unique and keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SublayerFlags {
    names: Vec<String>,
}

impl SublayerFlags {
    /// Flags of every sublayer-valued entry in `spec`.
    #[must_use]
    pub fn from_spec(spec: &LayerSpec) -> Self {
        Self::from_keys(spec.sublayers().map(|(key, _)| key))
    }

    /// Flags for the given sublayer trigger keys. Repeated keys collapse.
    pub fn from_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        let mut names: Vec<String> = Vec::new();
        for key in keys {
            let name = sublayer_flag_name(key);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self { names }
    }

    /// Returns true if `name` is one of the flags.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Iterates flag names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Iterates every flag except `own`.
    pub fn others<'a>(&'a self, own: &'a str) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |name| *name != own)
    }

    /// Number of flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the spec has no sublayers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
