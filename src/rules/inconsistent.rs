//! Inconsistent component detection rule.
//!
//! Reports every component with at least one scene attachment storing fields
//! the component's declared schema no longer has.

use crate::{
    core::{CheckContext, GlobalReport},
    issues::{InconsistentComponentIssue, MismatchSite},
};

pub fn check_inconsistent_components_issues(ctx: &CheckContext) -> Vec<InconsistentComponentIssue> {
    check_inconsistent_components(ctx.report())
}

/// One issue per distinct guid, with every offending attachment as a site.
pub fn check_inconsistent_components(report: &GlobalReport) -> Vec<InconsistentComponentIssue> {
    report
        .inconsistent()
        .iter()
        .map(|component| InconsistentComponentIssue {
            guid: component.guid.clone(),
            source: component.source.clone(),
            occurrences: component.occurrences,
            sites: report
                .mismatches_for(&component.guid)
                .map(|(scene_path, mismatch)| MismatchSite {
                    scene_path: scene_path.to_string(),
                    attachment_id: mismatch.attachment_id.clone(),
                    extra_fields: mismatch.extra_fields.clone(),
                })
                .collect(),
        })
        .collect()
}
