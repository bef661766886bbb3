//! Attachment ↔ schema cross-referencing.

use crate::core::{scene::AttachedComponentUsage, schema::SchemaRegistry};

/// Fields stored on one attachment that its schema no longer declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub guid: String,
    /// Local id of the attachment inside its scene.
    pub attachment_id: String,
    /// Sorted.
    pub extra_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    /// One entry per offending attachment; the same guid repeats when several
    /// attachments of the component are out of date.
    pub inconsistent: Vec<String>,
    pub mismatches: Vec<FieldMismatch>,
}

/// Compare each attachment's stored fields with its component's schema.
///
/// Attachments whose guid has no registered schema are skipped: with nothing
/// to compare against they can't be inconsistent.
pub fn cross_reference(
    usages: &[AttachedComponentUsage],
    registry: &SchemaRegistry,
) -> CrossReference {
    let mut result = CrossReference::default();

    for usage in usages {
        let Some(schema) = registry.get(&usage.guid) else {
            continue;
        };

        let extra_fields: Vec<String> = usage
            .fields
            .iter()
            .filter(|field| !schema.has_field(field))
            .cloned()
            .collect();
        if extra_fields.is_empty() {
            continue;
        }

        result.inconsistent.push(usage.guid.clone());
        result.mismatches.push(FieldMismatch {
            guid: usage.guid.clone(),
            attachment_id: usage.local_id.clone(),
            extra_fields,
        });
    }

    result
}
