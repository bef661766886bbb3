use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod hierarchy;
mod init;

const BIN_NAME: &str = "scenecheck";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the upward config search at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write a component source together with its `.meta` identity document.
    pub fn write_component(&self, path: &str, guid: &str, source: &str) -> Result<()> {
        self.write_file(path, source)?;
        self.write_file(
            &format!("{path}.meta"),
            &format!("fileFormatVersion: 2\nguid: {guid}\nMonoImporter:\n  serializedVersion: 2\n"),
        )
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for stable output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn hierarchy_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("hierarchy");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// YAML parser messages carry positions that depend on the parser version.
pub const YAML_ERROR_FILTER: (&str, &str) = (r"malformed YAML in [^\n]+", "malformed YAML in [ERROR]");

pub const MOVER_GUID: &str = "4f1b2c3d4e5f60718293a4b5c6d7e8f9";
pub const IDLE_GUID: &str = "0e9d8c7b6a5f4e3d2c1b0a9f8e7d6c5b";

pub const MOVER_SOURCE: &str = r#"using UnityEngine;

namespace Game
{
    public class Mover : MonoBehaviour
    {
        public float speed;
        [SerializeField] private Transform target;
        [System.NonSerialized] public int cachedFrame;
        private int scratch;
    }
}
"#;

pub const IDLE_SOURCE: &str = r#"using UnityEngine;

public class Idle : MonoBehaviour
{
    public int ticks;
}
"#;

/// One root (`Ship`) with a child (`Engine`) carrying a `Mover`.
pub fn ship_scene(extra_field: Option<&str>) -> String {
    let extra = extra_field
        .map(|name| format!("  {name}: 3\n"))
        .unwrap_or_default();
    format!(
        "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1 &100
GameObject:
  m_ObjectHideFlags: 0
  m_Component:
  - component: {{fileID: 101}}
  m_Name: Ship
--- !u!4 &101
Transform:
  m_GameObject: {{fileID: 100}}
  m_Children:
  - {{fileID: 201}}
  m_Father: {{fileID: 0}}
--- !u!1 &200
GameObject:
  m_Component:
  - component: {{fileID: 201}}
  - component: {{fileID: 202}}
  m_Name: Engine
--- !u!4 &201
Transform:
  m_GameObject: {{fileID: 200}}
  m_Children: []
  m_Father: {{fileID: 101}}
--- !u!114 &202
MonoBehaviour:
  m_GameObject: {{fileID: 200}}
  m_Enabled: 1
  m_Script: {{fileID: 11500000, guid: {MOVER_GUID}, type: 3}}
  speed: 5
  target: {{fileID: 101}}
{extra}"
    )
}
