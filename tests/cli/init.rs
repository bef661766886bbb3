use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, IDLE_GUID, IDLE_SOURCE};

/// Validates config file structure.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for key in [
        "includes",
        "ignores",
        "sceneExtensions",
        "baseClasses",
        "serializeMarkers",
        "nonSerializedMarkers",
    ] {
        assert!(parsed.get(key).is_some(), "Config should have '{key}' field");
    }

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"));

    assert!(test.root().join(".scenecheckrc.json").exists());
    let content = test.read_file(".scenecheckrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".scenecheckrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"));

    assert_eq!(test.read_file(".scenecheckrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    let status = test.command().arg("init").status()?;
    assert!(status.success());

    test.write_component("Assets/Idle.cs", IDLE_GUID, IDLE_SOURCE)?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}
