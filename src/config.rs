use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".scenecheckrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// File extensions (without the dot) treated as scene documents.
    #[serde(default = "default_scene_extensions")]
    pub scene_extensions: Vec<String>,
    /// Base type names that put a class in scope.
    #[serde(default = "default_base_classes")]
    pub base_classes: Vec<String>,
    #[serde(default = "default_serialize_markers")]
    pub serialize_markers: Vec<String>,
    #[serde(default = "default_non_serialized_markers")]
    pub non_serialized_markers: Vec<String>,
}

fn default_includes() -> Vec<String> {
    vec!["Assets".to_string()]
}

fn default_scene_extensions() -> Vec<String> {
    vec!["unity".to_string()]
}

fn default_base_classes() -> Vec<String> {
    ["MonoBehaviour", "ScriptableObject"]
        .map(String::from)
        .to_vec()
}

fn default_serialize_markers() -> Vec<String> {
    vec!["SerializeField".to_string()]
}

fn default_non_serialized_markers() -> Vec<String> {
    vec!["NonSerialized".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            scene_extensions: default_scene_extensions(),
            base_classes: default_base_classes(),
            serialize_markers: default_serialize_markers(),
            non_serialized_markers: default_non_serialized_markers(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, empty rule lists and dotted extensions.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.base_classes.is_empty() {
            bail!("'baseClasses' must name at least one base type");
        }
        if let Some(ext) = self.scene_extensions.iter().find(|e| e.starts_with('.')) {
            bail!(
                "Scene extensions are written without the dot: \"{}\" in 'sceneExtensions'",
                ext
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
