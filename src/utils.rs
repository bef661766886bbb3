//! Common utility functions shared across the codebase.

use std::path::{Component, Path};

/// Path of `path` relative to `root`, `/`-separated, for stable report output.
///
/// Falls back to the path as given when it does not live under `root`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use scenecheck::utils::relative_display_path;
///
/// assert_eq!(
///     relative_display_path(Path::new("/game"), Path::new("/game/Assets/Player.cs")),
///     "Assets/Player.cs"
/// );
/// ```
pub fn relative_display_path(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return path.to_string_lossy().replace('\\', "/");
    };
    relative
        .components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
