use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        aggregate::{Aggregator, GlobalReport},
        error::AnalysisError,
        file_scanner::scan_files,
        scene::{SceneResult, analyze_scene},
        schema::{RegistryBuild, SchemaRegistry, SchemaRules, build_registry},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
    utils::relative_display_path,
};

/// Phase 2 output: the merged report plus scenes that could not be analyzed.
struct SceneAnalysis {
    report: GlobalReport,
    errors: Vec<ParseErrorIssue>,
}

/// Core analysis context orchestrating the two-phase pipeline.
///
/// 1. **Phase 1: Schemas** → `registry()` (guid → declared fields, from `.cs` + `.meta`)
/// 2. **Phase 2: Scenes** → `report()` (per-scene extraction, hierarchy, cross-referencing)
///
/// Both phases are computed lazily on first access. Phase 2 forces phase 1 to
/// completion first, so scene workers only ever see the frozen registry.
pub struct CheckContext {
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Component source files, sorted.
    pub sources: Vec<String>,

    /// Scene documents, sorted.
    pub scenes: Vec<String>,

    pub verbose: bool,

    rules: SchemaRules,
    registry: OnceCell<RegistryBuild>,
    scene_analysis: OnceCell<SceneAnalysis>,
}

impl CheckContext {
    /// Load configuration and scan the project tree.
    ///
    /// # Errors
    ///
    /// Returns error if the root path is not valid UTF-8 or the config file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        if !root_dir.is_dir() {
            return Err(anyhow!("Source root is not a directory: {}", root_dir.display()));
        }

        let config_result = load_config(Path::new(path))?;
        if !config_result.from_file {
            tracing::debug!("no config file found, using default configuration");
        }
        let config = config_result.config;

        let scan_result = scan_files(
            path,
            &config.includes,
            &config.ignores,
            &config.scene_extensions,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        tracing::debug!(
            sources = scan_result.sources.len(),
            scenes = scan_result.scenes.len(),
            "scanned project"
        );

        Ok(Self {
            rules: SchemaRules::from_config(&config),
            config,
            root_dir,
            sources: scan_result.sources.into_iter().collect(),
            scenes: scan_result.scenes.into_iter().collect(),
            verbose,
            registry: OnceCell::new(),
            scene_analysis: OnceCell::new(),
        })
    }

    fn registry_build(&self) -> &RegistryBuild {
        self.registry
            .get_or_init(|| build_registry(&self.root_dir, &self.sources, &self.rules))
    }

    /// Phase 1: the frozen guid → schema registry.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry_build().registry
    }

    fn scene_analysis(&self) -> &SceneAnalysis {
        self.scene_analysis.get_or_init(|| {
            // Phase 1 must be complete before any scene worker starts.
            let registry = self.registry();
            analyze_scenes(&self.root_dir, &self.scenes, registry)
        })
    }

    /// Phase 2: the global usage and consistency report.
    pub fn report(&self) -> &GlobalReport {
        &self.scene_analysis().report
    }

    /// Per-scene results, sorted by scene path.
    pub fn scene_results(&self) -> &[SceneResult] {
        self.report().scenes()
    }

    /// Files from either phase that could not be read or parsed, sorted by path.
    pub fn parse_errors(&self) -> Vec<ParseErrorIssue> {
        let mut errors: Vec<ParseErrorIssue> = self
            .registry_build()
            .errors
            .iter()
            .chain(self.scene_analysis().errors.iter())
            .cloned()
            .collect();
        errors.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        errors
    }
}

/// Phase 2: analyze every scene in parallel and merge into one report.
///
/// A scene that fails to read or parse is logged and contributes nothing;
/// the other scenes are unaffected.
fn analyze_scenes(root: &Path, scenes: &[String], registry: &SchemaRegistry) -> SceneAnalysis {
    let aggregator = Aggregator::new();

    let errors: Vec<ParseErrorIssue> = scenes
        .par_iter()
        .filter_map(|scene| {
            let path = Path::new(scene);
            let scene_path = relative_display_path(root, path);

            let result = fs::read_to_string(path)
                .map_err(|e| AnalysisError::io(path, e))
                .and_then(|content| analyze_scene(&content, path, &scene_path, registry));

            match result {
                Ok(result) => {
                    tracing::debug!(
                        scene = %scene_path,
                        used = result.used.len(),
                        inconsistent = result.inconsistent.len(),
                        "analyzed scene"
                    );
                    aggregator.record(result);
                    None
                }
                Err(err) => {
                    tracing::warn!(path = %scene_path, error = %err, "skipping scene");
                    Some(ParseErrorIssue {
                        file_path: scene_path,
                        error: err.to_string(),
                        file_type: ParseErrorFileType::Scene,
                    })
                }
            }
        })
        .collect();

    SceneAnalysis {
        report: aggregator.finish(registry),
        errors,
    }
}
