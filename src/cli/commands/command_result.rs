use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Hierarchy(HierarchySummary),
    Init(InitSummary),
}

/// Reconstructed object trees, one per analyzed scene.
#[derive(Debug, Default)]
pub struct HierarchySummary {
    pub scenes: Vec<SceneOutline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneOutline {
    pub scene_path: String,
    pub roots: Vec<OutlineNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub name: String,
    pub local_id: String,
    pub children: Vec<OutlineNode>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Why the file was not written, if it wasn't.
    pub error: Option<String>,
}

/// Result of running a scenecheck command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted. Empty for `init`.
    pub issues: Vec<Issue>,
    /// Number of files that failed to read or parse.
    pub parse_error_count: usize,
    /// Number of component source files (`.cs`) that were scanned.
    pub source_files_checked: usize,
    /// Number of scene documents that were scanned.
    pub scene_files_checked: usize,
}
