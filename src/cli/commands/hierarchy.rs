use std::collections::HashSet;

use anyhow::{Ok, Result};

use super::super::args::HierarchyCommand;
use super::{
    CommandResult, CommandSummary, HierarchySummary, OutlineNode, SceneOutline, helper::finish,
};
use crate::{
    core::{
        CheckContext,
        scene::{SceneHierarchy, SceneObjectRecord, SceneResult},
    },
    issues::Issue,
};

pub fn hierarchy(cmd: HierarchyCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let scenes = ctx.scene_results().iter().map(scene_outline).collect();
    let issues = ctx
        .parse_errors()
        .into_iter()
        .map(Issue::ParseError)
        .collect();

    Ok(finish(
        CommandSummary::Hierarchy(HierarchySummary { scenes }),
        issues,
        ctx.sources.len(),
        ctx.scenes.len(),
    ))
}

pub fn scene_outline(scene: &SceneResult) -> SceneOutline {
    let mut visited = HashSet::new();
    SceneOutline {
        scene_path: scene.scene_path.clone(),
        roots: scene
            .roots()
            .iter()
            .filter_map(|root| outline_node(root, &scene.hierarchy, &mut visited))
            .collect(),
    }
}

/// Depth-first walk; each object appears once even if parent links loop.
fn outline_node<'a>(
    object: &'a SceneObjectRecord,
    hierarchy: &'a SceneHierarchy,
    visited: &mut HashSet<&'a str>,
) -> Option<OutlineNode> {
    if !visited.insert(object.local_id.as_str()) {
        return None;
    }
    let children = hierarchy
        .children_of(&object.local_id)
        .iter()
        .filter_map(|child| outline_node(child, hierarchy, visited))
        .collect();

    Some(OutlineNode {
        name: object.name.clone(),
        local_id: object.local_id.clone(),
        children,
    })
}
