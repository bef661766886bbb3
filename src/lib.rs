//! scenecheck - static analysis for Unity-style projects
//!
//! Finds script components that no scene uses, and scene data stored for
//! fields a component no longer declares. Component schemas come from C#
//! sources and their `.meta` identity documents; usages come from YAML scene
//! documents.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (two-phase pipeline)
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Tracing subscriber setup
//! - `rules`: Detection rules over the global report
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod rules;
pub mod utils;
