//! Phase 2: scene documents.
//!
//! - `document`: directive filtering and `--- !u!<type> &<id>` sectioning
//! - `extractor`: object, transform and script records
//! - `hierarchy`: root detection and the object tree
//! - `result`: per-scene pipeline producing a [`SceneResult`]

pub mod document;
pub mod extractor;
pub mod hierarchy;
pub mod result;
pub mod types;

pub use extractor::extract_scene;
pub use hierarchy::{SceneHierarchy, build_hierarchy};
pub use result::{SceneResult, analyze_scene};
pub use types::*;
