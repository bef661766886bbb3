//! Splitting a scene file into its tagged sub-documents.
//!
//! A serialized scene looks like:
//!
//! ```text
//! %YAML 1.1
//! %TAG !u! tag:unity3d.com,2011:
//! --- !u!1 &1204375127
//! GameObject:
//!   m_Name: Player
//! --- !u!4 &1204375129
//! Transform:
//!   m_Father: {fileID: 0}
//! ```
//!
//! Directive lines are dropped. Every `---` header carries the record's class
//! tag (`!u!<type>`) and its scene-local id (`&<id>`); the body below it is a
//! single-entry mapping whose value holds the record's fields.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde_yaml::Value;

use crate::core::error::{AnalysisError, AnalysisResult};

/// Class tag of game object records.
pub const OBJECT_TYPE: u32 = 1;
/// Class tag of transform records.
pub const TRANSFORM_TYPE: u32 = 4;
/// Class tag of script component records.
pub const SCRIPT_TYPE: u32 = 114;

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*(?:!u!(\d+))?(?:\s+&(\S+))?").unwrap());

/// One sub-document: header fields plus its unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub type_id: Option<u32>,
    /// Raw id token after `&`, if any.
    pub anchor: Option<String>,
    pub body: String,
}

impl Section {
    /// The local id normalized through an integer parse, so `&0042` and
    /// `{fileID: 42}` compare equal.
    pub fn local_id(&self) -> Option<String> {
        self.anchor
            .as_deref()
            .and_then(|a| a.parse::<i64>().ok())
            .map(|id| id.to_string())
    }
}

/// A parsed record ready for extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub type_id: u32,
    pub local_id: String,
    /// Field mapping of the record (the value under `GameObject:`, `Transform:`, ...).
    /// `Null` when the body is empty or not shaped like a single-entry mapping.
    pub fields: Value,
    /// Body text, kept for lookups that need scalars exactly as written.
    pub body: String,
}

/// Drop directive lines and cut the rest into sections at `---` headers.
///
/// Text before the first header has no tag and is discarded.
pub fn split_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in content.lines() {
        if line.starts_with('%') {
            continue;
        }

        if line.starts_with("---") {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            let (type_id, anchor) = parse_header(line);
            current = Some(Section {
                type_id,
                anchor,
                body: String::new(),
            });
            continue;
        }

        if let Some(section) = current.as_mut() {
            section.body.push_str(line);
            section.body.push('\n');
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }
    sections
}

fn parse_header(line: &str) -> (Option<u32>, Option<String>) {
    let Some(caps) = HEADER_REGEX.captures(line) else {
        return (None, None);
    };
    let type_id = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let anchor = caps.get(2).map(|m| m.as_str().to_string());
    (type_id, anchor)
}

/// Parse every tagged section of a scene into records.
///
/// Sections without a tag or without an integer local id are skipped. A body
/// that is not valid YAML fails the whole document.
pub fn parse_records(content: &str, path: &Path) -> AnalysisResult<Vec<RawRecord>> {
    let mut records = Vec::new();

    for section in split_sections(content) {
        let Some(type_id) = section.type_id else {
            continue;
        };
        let Some(local_id) = section.local_id() else {
            tracing::debug!(
                path = %path.display(),
                anchor = ?section.anchor,
                type_id,
                "skipping record without a usable local id"
            );
            continue;
        };

        let value: Value = if section.body.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&section.body).map_err(|e| AnalysisError::yaml(path, e))?
        };

        records.push(RawRecord {
            type_id,
            local_id,
            fields: record_fields(value),
            body: section.body,
        });
    }

    Ok(records)
}

fn record_fields(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => mapping
            .into_iter()
            .next()
            .map(|(_, fields)| fields)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Text of a scalar node. Collections, nulls and tagged values read as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `fileID` of a `{fileID: N, ...}` reference node.
pub fn file_id(reference: &Value) -> Option<String> {
    reference.get("fileID").and_then(scalar_text)
}
