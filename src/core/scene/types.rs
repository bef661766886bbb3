use std::collections::{BTreeSet, HashMap, HashSet};

/// Parent reference meaning "no parent".
pub const ROOT_PARENT_ID: &str = "0";

/// Prefix of engine-managed fields on a script record.
pub const RESERVED_FIELD_PREFIX: &str = "m_";

/// Field holding the script reference of a script record.
pub const SCRIPT_FIELD: &str = "m_Script";

/// A game object. Ids are only meaningful inside the scene that defines them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObjectRecord {
    pub local_id: String,
    pub name: String,
    /// First non-zero component reference; by engine convention the transform.
    pub transform_id: Option<String>,
}

impl SceneObjectRecord {
    pub fn placeholder_name(local_id: &str) -> String {
        format!("GameObject_{}", local_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRecord {
    pub local_id: String,
    /// `"0"` when the transform sits at the scene root.
    pub parent_id: String,
    /// Child transform ids listed by this transform.
    pub children: Vec<String>,
}

impl TransformRecord {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}

/// A script component attached somewhere in the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedComponentUsage {
    pub local_id: String,
    pub guid: String,
    /// User data fields stored on the attachment.
    pub fields: BTreeSet<String>,
}

/// Everything extracted from one scene. Lives only while that scene is processed.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub objects: HashMap<String, SceneObjectRecord>,
    pub transforms: HashMap<String, TransformRecord>,
    pub usages: Vec<AttachedComponentUsage>,
    /// Every script guid referenced, whether or not its schema is known.
    pub used: HashSet<String>,
}
