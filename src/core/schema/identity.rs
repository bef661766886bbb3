//! Identity lookup from `.meta` documents.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Suffix appended to a source path to find its identity document.
pub const META_SUFFIX: &str = ".meta";

/// Only the `guid` key matters; everything else in the document is ignored.
#[derive(Debug, Deserialize)]
struct MetaDocument {
    #[serde(default)]
    guid: Option<String>,
}

/// Path of the identity document paired with `source_path`.
pub fn meta_path_for(source_path: &Path) -> PathBuf {
    let mut path = source_path.as_os_str().to_owned();
    path.push(META_SUFFIX);
    PathBuf::from(path)
}

/// Extract the top-level `guid` from a `.meta` document.
///
/// `String` fields keep the raw scalar text, so a guid made only of digits is
/// not reinterpreted as a number. Returns `None` when the document does not
/// parse, has no `guid`, or the value is not a scalar.
pub fn resolve_identity(content: &str) -> Option<String> {
    let document: MetaDocument = serde_yaml::from_str(content).ok()?;
    document
        .guid
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
}
