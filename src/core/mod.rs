//! Core analysis engine.
//!
//! ## Module Structure
//!
//! - `schema`: Phase 1, component schemas from `.cs` sources and `.meta` identities
//! - `scene`: Phase 2, scene documents to records, hierarchy and per-scene results
//! - `cross_ref`: attachment fields checked against the registry
//! - `aggregate`: concurrent merge of scene results into the global report
//! - `context`: `CheckContext`, which runs the phases in order
//! - `file_scanner`: project tree traversal
//! - `error`: per-file error type

pub mod aggregate;
pub mod context;
pub mod cross_ref;
pub mod error;
pub mod file_scanner;
pub mod scene;
pub mod schema;

pub use aggregate::{Aggregator, GlobalReport, InconsistentComponent, SchemaSource};
pub use context::CheckContext;
pub use cross_ref::{CrossReference, FieldMismatch, cross_reference};
pub use error::{AnalysisError, AnalysisResult};
