//! Phase 1: component schemas.
//!
//! - `collector`: serializable fields of component classes in one C# file
//! - `identity`: the guid stored in the file's `.meta` companion
//! - `registry`: parallel collection into the frozen guid → schema map

pub mod collector;
pub mod identity;
pub mod registry;
pub mod types;

pub use collector::{SchemaRules, collect_schema};
pub use identity::{META_SUFFIX, meta_path_for, resolve_identity};
pub use registry::{RegistryBuild, SchemaRegistry, build_registry, load_component};
pub use types::*;
