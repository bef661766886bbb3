//! Object tree reconstruction from transform parent links.

use std::collections::{HashMap, HashSet};

use super::types::{ROOT_PARENT_ID, SceneObjectRecord, TransformRecord};

/// Root objects of a scene and the object tree under them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneHierarchy {
    /// Sorted by name (ordinal), then local id.
    pub roots: Vec<SceneObjectRecord>,
    /// Parent object id → child objects, sorted like `roots`.
    pub children: HashMap<String, Vec<SceneObjectRecord>>,
}

impl SceneHierarchy {
    pub fn children_of(&self, object_id: &str) -> &[SceneObjectRecord] {
        self.children
            .get(object_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Work out which objects sit at the scene root and how the rest hang below them.
///
/// An object is a root when its transform's parent is `"0"`. When the
/// transform record itself is missing, the object is still treated as a root
/// unless that id belongs to a transform known to have a parent, which a
/// missing record never does. This fallback is a best-effort guess for
/// partially parsed scenes: an object whose transform is missing is reported
/// as a root even when another transform lists it in `m_Children`.
pub fn build_hierarchy(
    objects: &HashMap<String, SceneObjectRecord>,
    transforms: &HashMap<String, TransformRecord>,
) -> SceneHierarchy {
    let known_children = known_child_ids(transforms);

    let mut roots: Vec<SceneObjectRecord> = objects
        .values()
        .filter(|object| is_root(object, transforms, &known_children))
        .cloned()
        .collect();
    sort_by_name(&mut roots);

    SceneHierarchy {
        roots,
        children: child_objects(objects, transforms),
    }
}

/// Transform ids known not to be roots: those whose own parent is not `"0"`.
fn known_child_ids(transforms: &HashMap<String, TransformRecord>) -> HashSet<&str> {
    transforms
        .values()
        .filter(|t| !t.is_root())
        .map(|t| t.local_id.as_str())
        .collect()
}

fn is_root(
    object: &SceneObjectRecord,
    transforms: &HashMap<String, TransformRecord>,
    known_children: &HashSet<&str>,
) -> bool {
    let transform_id = object.transform_id.as_deref().unwrap_or(ROOT_PARENT_ID);
    match transforms.get(transform_id) {
        Some(transform) => transform.is_root(),
        None => !known_children.contains(transform_id),
    }
}

fn child_objects(
    objects: &HashMap<String, SceneObjectRecord>,
    transforms: &HashMap<String, TransformRecord>,
) -> HashMap<String, Vec<SceneObjectRecord>> {
    let owners: HashMap<&str, &SceneObjectRecord> = objects
        .values()
        .filter_map(|object| object.transform_id.as_deref().map(|t| (t, object)))
        .collect();

    let mut children: HashMap<String, Vec<SceneObjectRecord>> = HashMap::new();
    for object in objects.values() {
        let Some(transform) = object
            .transform_id
            .as_deref()
            .and_then(|t| transforms.get(t))
        else {
            continue;
        };
        if transform.is_root() {
            continue;
        }
        if let Some(parent) = owners.get(transform.parent_id.as_str()) {
            children
                .entry(parent.local_id.clone())
                .or_default()
                .push(object.clone());
        }
    }

    for list in children.values_mut() {
        sort_by_name(list);
    }
    children
}

fn sort_by_name(objects: &mut [SceneObjectRecord]) {
    objects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.local_id.cmp(&b.local_id)));
}
