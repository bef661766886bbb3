//! Unused component detection rule.
//!
//! Detects components declared in source whose guid no scene references.

use std::collections::BTreeSet;

use crate::{core::CheckContext, core::schema::SchemaRegistry, issues::UnusedComponentIssue};

pub fn check_unused_components_issues(ctx: &CheckContext) -> Vec<UnusedComponentIssue> {
    check_unused_components(ctx.report().unused(), ctx.registry())
}

/// One issue per unused guid, sorted by source path.
pub fn check_unused_components(
    unused: &BTreeSet<String>,
    registry: &SchemaRegistry,
) -> Vec<UnusedComponentIssue> {
    let mut issues: Vec<UnusedComponentIssue> = unused
        .iter()
        .filter_map(|guid| registry.get(guid))
        .map(|schema| UnusedComponentIssue {
            guid: schema.guid.clone(),
            source_path: schema.source_path.clone(),
            class_names: schema.class_names.clone(),
        })
        .collect();

    issues.sort_by(|a, b| {
        a.source_path
            .cmp(&b.source_path)
            .then_with(|| a.guid.cmp(&b.guid))
    });
    issues
}
