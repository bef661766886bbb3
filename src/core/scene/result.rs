use std::{collections::HashSet, path::Path};

use super::{extractor::extract_scene, hierarchy::SceneHierarchy, hierarchy::build_hierarchy};
use crate::core::{
    cross_ref::{FieldMismatch, cross_reference},
    error::AnalysisResult,
    schema::SchemaRegistry,
};

/// What one scene contributes to the global report.
#[derive(Debug, Clone, Default)]
pub struct SceneResult {
    pub scene_path: String,
    pub hierarchy: SceneHierarchy,
    pub used: HashSet<String>,
    /// May repeat a guid once per out-of-date attachment.
    pub inconsistent: Vec<String>,
    pub mismatches: Vec<FieldMismatch>,
}

impl SceneResult {
    /// Root objects, sorted by name.
    pub fn roots(&self) -> &[super::SceneObjectRecord] {
        &self.hierarchy.roots
    }
}

/// Run extraction, hierarchy reconstruction and cross-referencing for one scene.
///
/// The scene's id-keyed records are dropped on return; only the distilled
/// result leaves this function.
pub fn analyze_scene(
    content: &str,
    path: &Path,
    scene_path: &str,
    registry: &SchemaRegistry,
) -> AnalysisResult<SceneResult> {
    let graph = extract_scene(content, path)?;
    let hierarchy = build_hierarchy(&graph.objects, &graph.transforms);
    let cross = cross_reference(&graph.usages, registry);

    Ok(SceneResult {
        scene_path: scene_path.to_string(),
        hierarchy,
        used: graph.used,
        inconsistent: cross.inconsistent,
        mismatches: cross.mismatches,
    })
}
