//! Declarative layer definitions: the compiler's input.

use crate::models::action::LeafAction;
use crate::models::key_code::KeyCode;
use anyhow::Result;

/// Bindings of one sublayer: what each key does while the sublayer is active.
///
/// Keys are unique and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SublayerMapping {
    entries: Vec<(KeyCode, LeafAction)>,
}

impl SublayerMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds `key` to `action`.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is already bound in this sublayer.
    pub fn insert(&mut self, key: KeyCode, action: LeafAction) -> Result<()> {
        if self.get(key).is_some() {
            anyhow::bail!("Key '{}' is bound twice in the same sublayer", key);
        }
        self.entries.push((key, action));
        Ok(())
    }

    /// Looks up the binding of `key`.
    #[must_use]
    pub fn get(&self, key: KeyCode) -> Option<&LeafAction> {
        self.entries
            .iter()
            .find_map(|(k, action)| (*k == key).then_some(action))
    }

    /// Iterates bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, &LeafAction)> {
        self.entries.iter().map(|(k, action)| (*k, action))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Value of a top-level binding: a direct action or a whole sublayer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerEntry {
    /// Hyper + key performs the action directly
    Leaf(LeafAction),
    /// Hyper + key activates a sublayer
    Sublayer(SublayerMapping),
}

impl From<LeafAction> for LayerEntry {
    fn from(action: LeafAction) -> Self {
        Self::Leaf(action)
    }
}

impl From<SublayerMapping> for LayerEntry {
    fn from(mapping: SublayerMapping) -> Self {
        Self::Sublayer(mapping)
    }
}

/// The full declarative input: top-level keys mapped to actions or sublayers.
///
/// Keys are unique and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSpec {
    entries: Vec<(KeyCode, LayerEntry)>,
}

impl LayerSpec {
    /// Creates an empty spec.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds top-level `key` to a leaf action or sublayer.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is already bound at the top level.
    pub fn insert(&mut self, key: KeyCode, entry: impl Into<LayerEntry>) -> Result<()> {
        if self.get(key).is_some() {
            anyhow::bail!("Key '{}' is bound twice at the top level", key);
        }
        self.entries.push((key, entry.into()));
        Ok(())
    }

    /// Looks up the entry bound to `key`.
    #[must_use]
    pub fn get(&self, key: KeyCode) -> Option<&LayerEntry> {
        self.entries
            .iter()
            .find_map(|(k, entry)| (*k == key).then_some(entry))
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, &LayerEntry)> {
        self.entries.iter().map(|(k, entry)| (*k, entry))
    }

    /// Iterates only the sublayer entries, in insertion order.
    pub fn sublayers(&self) -> impl Iterator<Item = (KeyCode, &SublayerMapping)> {
        self.iter().filter_map(|(k, entry)| match entry {
            LayerEntry::Sublayer(mapping) => Some((k, mapping)),
            LayerEntry::Leaf(_) => None,
        })
    }

    /// Iterates only the direct bindings, in insertion order.
    pub fn leaves(&self) -> impl Iterator<Item = (KeyCode, &LeafAction)> {
        self.iter().filter_map(|(k, entry)| match entry {
            LayerEntry::Leaf(action) => Some((k, action)),
            LayerEntry::Sublayer(_) => None,
        })
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the spec binds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
