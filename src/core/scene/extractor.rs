//! Record extraction from a parsed scene.
//!
//! Every field lookup is permissive: a field of the wrong shape is treated as
//! missing, never as an error.

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use serde::Deserialize;
use serde_yaml::Value;

use super::{
    document::{OBJECT_TYPE, RawRecord, SCRIPT_TYPE, TRANSFORM_TYPE, file_id, parse_records, scalar_text},
    types::{
        AttachedComponentUsage, RESERVED_FIELD_PREFIX, ROOT_PARENT_ID, SCRIPT_FIELD, SceneGraph,
        SceneObjectRecord, TransformRecord,
    },
};
use crate::core::error::AnalysisResult;

/// Parse one scene document into its object, transform and script records.
pub fn extract_scene(content: &str, path: &Path) -> AnalysisResult<SceneGraph> {
    let mut graph = SceneGraph::default();

    for record in parse_records(content, path)? {
        match record.type_id {
            OBJECT_TYPE => {
                let object = extract_object(&record);
                graph
                    .objects
                    .entry(object.local_id.clone())
                    .or_insert(object);
            }
            TRANSFORM_TYPE => {
                let transform = extract_transform(&record);
                graph
                    .transforms
                    .entry(transform.local_id.clone())
                    .or_insert(transform);
            }
            SCRIPT_TYPE => {
                if let Some(usage) = extract_usage(&record) {
                    graph.used.insert(usage.guid.clone());
                    graph.usages.push(usage);
                }
            }
            _ => {}
        }
    }

    Ok(graph)
}

fn extract_object(record: &RawRecord) -> SceneObjectRecord {
    let name = record
        .fields
        .get("m_Name")
        .and_then(scalar_text)
        .unwrap_or_else(|| SceneObjectRecord::placeholder_name(&record.local_id));

    // Entries look like `- component: {fileID: 4}` (older files: `- 4: {fileID: 4}`).
    let transform_id = record
        .fields
        .get("m_Component")
        .and_then(Value::as_sequence)
        .and_then(|entries| {
            entries
                .iter()
                .filter_map(component_reference)
                .find(|id| id != ROOT_PARENT_ID)
        });

    SceneObjectRecord {
        local_id: record.local_id.clone(),
        name,
        transform_id,
    }
}

fn component_reference(entry: &Value) -> Option<String> {
    entry.as_mapping()?.values().find_map(file_id)
}

fn extract_transform(record: &RawRecord) -> TransformRecord {
    let parent_id = record
        .fields
        .get("m_Father")
        .and_then(file_id)
        .unwrap_or_else(|| ROOT_PARENT_ID.to_string());

    let children = record
        .fields
        .get("m_Children")
        .and_then(Value::as_sequence)
        .map(|entries| {
            entries
                .iter()
                .filter_map(file_id)
                .filter(|id| id != ROOT_PARENT_ID)
                .collect()
        })
        .unwrap_or_default();

    TransformRecord {
        local_id: record.local_id.clone(),
        parent_id,
        children,
    }
}

#[derive(Debug, Deserialize)]
struct ScriptReference {
    #[serde(default)]
    guid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScriptFields {
    #[serde(rename = "m_Script", default)]
    script: Option<ScriptReference>,
}

fn extract_usage(record: &RawRecord) -> Option<AttachedComponentUsage> {
    let guid = script_guid(record)?;

    let fields: BTreeSet<String> = record
        .fields
        .as_mapping()
        .map(|mapping| {
            mapping
                .keys()
                .filter_map(scalar_text)
                .filter(|name| name != SCRIPT_FIELD && !name.starts_with(RESERVED_FIELD_PREFIX))
                .collect()
        })
        .unwrap_or_default();

    Some(AttachedComponentUsage {
        local_id: record.local_id.clone(),
        guid,
        fields,
    })
}

/// Guid of the record's script reference.
///
/// Read through a typed pass first so the guid keeps its exact text even when
/// it happens to look like a number; fall back to the generic tree.
fn script_guid(record: &RawRecord) -> Option<String> {
    // `Value` resolves a long all-digit guid to a float and loses its text.
    let typed = serde_yaml::from_str::<HashMap<String, ScriptFields>>(&record.body)
        .ok()
        .and_then(|sections| sections.into_values().next())
        .and_then(|fields| fields.script)
        .and_then(|script| script.guid);

    typed
        .or_else(|| {
            record
                .fields
                .get(SCRIPT_FIELD)
                .and_then(|script| script.get("guid"))
                .and_then(scalar_text)
        })
        .map(|guid| guid.trim().to_string())
        .filter(|guid| !guid.is_empty())
}
