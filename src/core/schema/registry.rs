//! Phase 1: build the guid → schema registry from all component sources.

use std::{fs, path::Path};

use dashmap::{DashMap, mapref::entry::Entry};
use rayon::prelude::*;

use super::{
    collector::{SchemaRules, collect_schema},
    identity::{meta_path_for, resolve_identity},
    types::{ComponentSchema, SchemaMap},
};
use crate::{
    core::error::{AnalysisError, AnalysisResult},
    issues::{ParseErrorFileType, ParseErrorIssue},
    utils::relative_display_path,
};

/// Immutable guid → schema map shared read-only by every scene worker.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    /// Build from already-collected schemas. Earlier entries win on duplicate guids.
    pub fn from_schemas(schemas: impl IntoIterator<Item = ComponentSchema>) -> Self {
        let mut map = SchemaMap::new();
        for schema in schemas {
            map.entry(schema.guid.clone()).or_insert(schema);
        }
        Self { schemas: map }
    }

    pub fn get(&self, guid: &str) -> Option<&ComponentSchema> {
        self.schemas.get(guid)
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.schemas.contains_key(guid)
    }

    pub fn guids(&self) -> impl Iterator<Item = &String> {
        self.schemas.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Phase 1 output: the frozen registry plus files that could not be read or parsed.
#[derive(Debug, Default)]
pub struct RegistryBuild {
    pub registry: SchemaRegistry,
    pub errors: Vec<ParseErrorIssue>,
}

/// Collect schemas from every source file in parallel.
///
/// Each file is independent. Registration is insert-if-absent on a concurrent
/// map, so when two files share a guid the first one to register is kept and
/// the other is logged and dropped. The map is frozen before returning; nothing
/// writes to it afterwards.
pub fn build_registry(root: &Path, sources: &[String], rules: &SchemaRules) -> RegistryBuild {
    let schemas: DashMap<String, ComponentSchema> = DashMap::new();

    let errors: Vec<ParseErrorIssue> = sources
        .par_iter()
        .filter_map(|source| match load_component(root, Path::new(source), rules) {
            Ok(Some(schema)) => {
                register(&schemas, schema);
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(path = %source, error = %err, "skipping component source");
                Some(ParseErrorIssue {
                    file_path: relative_display_path(root, Path::new(source)),
                    error: err.to_string(),
                    file_type: ParseErrorFileType::Source,
                })
            }
        })
        .collect();

    RegistryBuild {
        registry: SchemaRegistry {
            schemas: schemas.into_iter().collect(),
        },
        errors,
    }
}

fn register(schemas: &DashMap<String, ComponentSchema>, schema: ComponentSchema) {
    match schemas.entry(schema.guid.clone()) {
        Entry::Occupied(existing) => {
            tracing::warn!(
                guid = %schema.guid,
                kept = %existing.get().source_path,
                ignored = %schema.source_path,
                "duplicate guid, keeping the first registration"
            );
        }
        Entry::Vacant(slot) => {
            slot.insert(schema);
        }
    }
}

/// Scan one source file and pair it with the guid from its `.meta` document.
///
/// `Ok(None)` covers every soft skip: no component class in the file, no
/// identity document, or an identity document without a usable guid.
pub fn load_component(
    root: &Path,
    source: &Path,
    rules: &SchemaRules,
) -> AnalysisResult<Option<ComponentSchema>> {
    let code = fs::read_to_string(source).map_err(|e| AnalysisError::io(source, e))?;
    let scan = collect_schema(&code, source, rules)?;
    if scan.is_empty() {
        return Ok(None);
    }

    let meta_path = meta_path_for(source);
    let Some(guid) = read_guid(&meta_path) else {
        return Ok(None);
    };

    Ok(Some(ComponentSchema::new(
        guid,
        relative_display_path(root, source),
        scan,
    )))
}

fn read_guid(meta_path: &Path) -> Option<String> {
    let content = match fs::read_to_string(meta_path) {
        Ok(content) => content,
        Err(e) => {
            let err = AnalysisError::io(meta_path, e);
            if err.is_not_found() {
                tracing::debug!(path = %meta_path.display(), "no identity document");
            } else {
                tracing::warn!(path = %meta_path.display(), error = %err, "unreadable identity document");
            }
            return None;
        }
    };

    let guid = resolve_identity(&content);
    if guid.is_none() {
        tracing::warn!(path = %meta_path.display(), "identity document has no usable guid");
    }
    guid
}
