use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Extension of component source files.
pub const SOURCE_EXTENSION: &str = "cs";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning the project tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Component source files (`.cs`).
    pub sources: BTreeSet<String>,
    /// Scene documents, by configured extension.
    pub scenes: BTreeSet<String>,
    pub skipped_count: usize,
}

/// What a scanned file is, if anything we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Scene,
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    scene_extensions: &[String],
) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = Path::new(base_dir).join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|e| e.is_dir())),
                    Err(e) => tracing::warn!(pattern = %inc, error = %e, "invalid include pattern"),
                }
            } else {
                let path = Path::new(base_dir).join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    tracing::warn!(path = %path.display(), "include path does not exist");
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    tracing::debug!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }
            if !path.is_file() {
                continue;
            }

            match classify(path, scene_extensions) {
                Some(FileKind::Source) => {
                    result.sources.insert(path_str.into());
                }
                Some(FileKind::Scene) => {
                    result.scenes.insert(path_str.into());
                }
                None => {}
            }
        }
    }

    result
}

pub fn classify(path: &Path, scene_extensions: &[String]) -> Option<FileKind> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    if ext == SOURCE_EXTENSION {
        Some(FileKind::Source)
    } else if scene_extensions.iter().any(|s| s == ext) {
        Some(FileKind::Scene)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn unity() -> Vec<String> {
        vec!["unity".to_owned()]
    }

    #[test]
    fn test_scan_classifies_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("Mover.cs")).unwrap();
        File::create(dir_path.join("Mover.cs.meta")).unwrap();
        File::create(dir_path.join("Main.unity")).unwrap();
        File::create(dir_path.join("Enemy.prefab")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], &unity());

        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.iter().any(|f| f.ends_with("Mover.cs")));
        assert_eq!(result.scenes.len(), 1);
        assert!(result.scenes.iter().any(|f| f.ends_with("Main.unity")));
    }

    #[test]
    fn test_scan_extra_scene_extension() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();
        File::create(dir_path.join("Main.unity")).unwrap();
        File::create(dir_path.join("Enemy.prefab")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &[],
            &["unity".to_owned(), "prefab".to_owned()],
        );
        assert_eq!(result.scenes.len(), 2);
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let assets = dir_path.join("Assets");
        fs::create_dir(&assets).unwrap();
        File::create(assets.join("Mover.cs")).unwrap();

        let library = dir_path.join("Library");
        fs::create_dir(&library).unwrap();
        File::create(library.join("Cached.cs")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["Assets".to_owned()],
            &[],
            &unity(),
        );

        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.iter().any(|f| f.ends_with("Assets/Mover.cs")));
    }

    #[test]
    fn test_scan_with_nonexistent_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let assets = dir_path.join("Assets");
        fs::create_dir(&assets).unwrap();
        File::create(assets.join("Main.unity")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["Assets".to_owned(), "Missing".to_owned()],
            &[],
            &unity(),
        );

        assert_eq!(result.scenes.len(), 1);
    }

    #[test]
    fn test_scan_deduplicates_overlapping_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let scripts = dir_path.join("Assets").join("Scripts");
        fs::create_dir_all(&scripts).unwrap();
        File::create(scripts.join("Mover.cs")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["Assets".to_owned(), "Assets/Scripts".to_owned()],
            &[],
            &unity(),
        );

        assert_eq!(result.sources.len(), 1);
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let scripts = dir_path.join("Assets").join("Scripts");
        fs::create_dir_all(&scripts).unwrap();
        File::create(scripts.join("Mover.cs")).unwrap();

        let scenes = dir_path.join("Assets").join("Scenes");
        fs::create_dir_all(&scenes).unwrap();
        File::create(scenes.join("Main.unity")).unwrap();

        let packages = dir_path.join("Packages");
        fs::create_dir_all(&packages).unwrap();
        File::create(packages.join("Vendor.cs")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["Assets/*".to_owned()],
            &[],
            &unity(),
        );

        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.scenes.len(), 1);
        assert!(!result.sources.iter().any(|f| f.ends_with("Vendor.cs")));
    }

    #[test]
    fn test_scan_ignores_mixed_patterns() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let scripts = dir_path.join("Assets").join("Scripts");
        fs::create_dir_all(&scripts).unwrap();
        File::create(scripts.join("Mover.cs")).unwrap();
        File::create(scripts.join("MoverTests.cs")).unwrap();

        let plugins = dir_path.join("Assets").join("Plugins");
        fs::create_dir_all(&plugins).unwrap();
        File::create(plugins.join("Thirdparty.cs")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["Assets".to_owned()],
            &["Assets/Plugins".to_owned(), "**/*Tests.cs".to_owned()],
            &unity(),
        );

        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.iter().any(|f| f.ends_with("Mover.cs")));
    }

    #[test]
    fn test_classify() {
        let exts = unity();
        assert_eq!(classify(Path::new("a/Mover.cs"), &exts), Some(FileKind::Source));
        assert_eq!(classify(Path::new("a/Main.unity"), &exts), Some(FileKind::Scene));
        assert_eq!(classify(Path::new("a/Mover.cs.meta"), &exts), None);
        assert_eq!(classify(Path::new("README"), &exts), None);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("Assets/*"));
        assert!(is_glob_pattern("**/*.cs"));
        assert!(is_glob_pattern("Level?.unity"));
        assert!(!is_glob_pattern("Assets"));
        assert!(!is_glob_pattern("Assets/[Generated]"));
    }
}
