//! Parsing of layer spec files.
//!
//! This module reads the declarative layer description from TOML, JSON/JSON5
//! or YAML documents.

pub mod document;
pub mod layer_spec;

// Re-export commonly used functions
pub use layer_spec::{load_layer_spec, parse_layer_spec, SpecFormat};
