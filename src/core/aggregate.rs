//! Merging per-scene results into the global report.
//!
//! Scene workers call [`Aggregator::record`] concurrently. The used-guid set is
//! the only structure they contend on and sits behind a single lock; the
//! inconsistency multiset and the finished scenes go into lock-free queues.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
};

use crossbeam::queue::SegQueue;
use parking_lot::Mutex;

use crate::core::{cross_ref::FieldMismatch, scene::SceneResult, schema::SchemaRegistry};

#[derive(Debug, Default)]
pub struct Aggregator {
    used: Mutex<HashSet<String>>,
    inconsistent: SegQueue<String>,
    scenes: SegQueue<SceneResult>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scene's result into the shared state.
    pub fn record(&self, mut result: SceneResult) {
        let used = std::mem::take(&mut result.used);
        self.used.lock().extend(used);

        for guid in std::mem::take(&mut result.inconsistent) {
            self.inconsistent.push(guid);
        }
        self.scenes.push(result);
    }

    /// Drain everything once all workers are done.
    pub fn finish(self, registry: &SchemaRegistry) -> GlobalReport {
        let used: BTreeSet<String> = self.used.into_inner().into_iter().collect();
        let unused = unused_guids(registry.guids(), &used);

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        while let Some(guid) = self.inconsistent.pop() {
            *counts.entry(guid).or_default() += 1;
        }
        let inconsistent = counts
            .into_iter()
            .map(|(guid, occurrences)| InconsistentComponent {
                source: registry
                    .get(&guid)
                    .map(|s| SchemaSource::Known(s.source_path.clone()))
                    .unwrap_or(SchemaSource::Unknown),
                guid,
                occurrences,
            })
            .collect();

        let mut scenes = Vec::with_capacity(self.scenes.len());
        while let Some(scene) = self.scenes.pop() {
            scenes.push(scene);
        }
        scenes.sort_by(|a, b| a.scene_path.cmp(&b.scene_path));

        GlobalReport {
            used,
            unused,
            inconsistent,
            scenes,
        }
    }
}

/// Where an inconsistent guid's schema came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Known(String),
    Unknown,
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Known(path) => write!(f, "{}", path),
            SchemaSource::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistentComponent {
    pub guid: String,
    pub source: SchemaSource,
    /// Number of out-of-date attachments across all scenes.
    pub occurrences: usize,
}

/// Final, read-only view of a run.
#[derive(Debug)]
pub struct GlobalReport {
    used: BTreeSet<String>,
    unused: BTreeSet<String>,
    inconsistent: Vec<InconsistentComponent>,
    scenes: Vec<SceneResult>,
}

impl GlobalReport {
    /// Every guid referenced by any scene, known schema or not.
    pub fn used(&self) -> &BTreeSet<String> {
        &self.used
    }

    /// Registered guids that no scene references.
    pub fn unused(&self) -> &BTreeSet<String> {
        &self.unused
    }

    /// Deduplicated inconsistent guids, sorted, each with its schema source.
    pub fn inconsistent(&self) -> &[InconsistentComponent] {
        &self.inconsistent
    }

    /// Per-scene results, sorted by scene path.
    pub fn scenes(&self) -> &[SceneResult] {
        &self.scenes
    }

    /// Out-of-date attachments of one guid, with the scene they live in.
    pub fn mismatches_for<'a>(
        &'a self,
        guid: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a FieldMismatch)> + 'a {
        self.scenes.iter().flat_map(move |scene| {
            scene
                .mismatches
                .iter()
                .filter(move |m| m.guid == guid)
                .map(move |m| (scene.scene_path.as_str(), m))
        })
    }
}

/// `schema_guids` minus `used`.
pub fn unused_guids<'a>(
    schema_guids: impl IntoIterator<Item = &'a String>,
    used: &BTreeSet<String>,
) -> BTreeSet<String> {
    schema_guids
        .into_iter()
        .filter(|guid| !used.contains(*guid))
        .cloned()
        .collect()
}
