//! Service layer for file I/O.
//!
//! This module contains services that sit between the CLI and the pure
//! model/compiler code: loading layer specs and writing Karabiner profiles.

pub mod layer_specs;
pub mod profile;

// Re-export commonly used types and functions
pub use layer_specs::LayerSpecService;
pub use profile::{KarabinerConfig, ProfileService};
