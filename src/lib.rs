//! HyperLayers Library
//!
//! This library compiles a declarative description of hyper key sublayers
//! into Karabiner-Elements complex modification rules. It covers parsing
//! layer spec files, validating them, compiling them into rule groups, and
//! writing the resulting Karabiner profile.

// Module declarations
pub mod actions;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
