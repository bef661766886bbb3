use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{
    CliTest, IDLE_GUID, IDLE_SOURCE, MOVER_GUID, MOVER_SOURCE, YAML_ERROR_FILTER, ship_scene,
};

fn project(extra_field: Option<&str>) -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_component("Assets/Scripts/Mover.cs", MOVER_GUID, MOVER_SOURCE)?;
    test.write_file("Assets/Scenes/Main.unity", &ship_scene(extra_field))?;
    Ok(test)
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = project(None)?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_unused_component_is_a_warning() -> Result<()> {
    let test = project(None)?;
    test.write_component("Assets/Scripts/Idle.cs", IDLE_GUID, IDLE_SOURCE)?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_inconsistent_component_is_an_error() -> Result<()> {
    let test = project(Some("turnRate"))?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_excluded_field_counts_as_removed() -> Result<()> {
    let test = project(Some("cachedFrame"))?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_same_component_out_of_date_in_two_scenes() -> Result<()> {
    let test = project(Some("turnRate"))?;
    test.write_file("Assets/Scenes/Dock.unity", &ship_scene(Some("drag")))?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_select_single_rule() -> Result<()> {
    let test = project(Some("turnRate"))?;
    test.write_component("Assets/Scripts/Idle.cs", IDLE_GUID, IDLE_SOURCE)?;

    assert_cmd_snapshot!(test.check_command().arg("unused"));

    Ok(())
}

#[test]
fn test_broken_scene_does_not_stop_others() -> Result<()> {
    let test = project(Some("turnRate"))?;
    test.write_file(
        "Assets/Scenes/Broken.unity",
        "--- !u!114 &5\nMonoBehaviour:\n  m_Script: [never closed\n",
    )?;

    insta::with_settings!({filters => vec![YAML_ERROR_FILTER]}, {
        assert_cmd_snapshot!(test.check_command());
    });

    Ok(())
}

#[test]
fn test_source_root_argument() -> Result<()> {
    let test = CliTest::new()?;
    test.write_component("game/Assets/Idle.cs", IDLE_GUID, IDLE_SOURCE)?;

    assert_cmd_snapshot!(
        test.check_command()
            .arg("--source-root")
            .arg(test.root().join("game"))
    );

    Ok(())
}

#[test]
fn test_config_ignores_and_extensions() -> Result<()> {
    let test = project(None)?;
    test.write_component("Assets/Plugins/Idle.cs", IDLE_GUID, IDLE_SOURCE)?;
    test.write_file("Assets/Prefabs/Broken.prefab", "--- !u!1 &1\nGameObject: [\n")?;
    test.write_file(
        ".scenecheckrc.json",
        r#"{ "ignores": ["Assets/Plugins"], "sceneExtensions": ["unity"] }"#,
    )?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_invalid_config_is_an_internal_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".scenecheckrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    insta::with_settings!({filters => vec![
        (r#"(Invalid glob pattern in 'ignores': "\[invalid"): [^\n]+"#, "$1: [ERROR]"),
    ]}, {
        assert_cmd_snapshot!(test.check_command());
    });

    Ok(())
}

#[test]
fn test_dotted_scene_extension_is_rejected() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".scenecheckrc.json", r#"{ "sceneExtensions": [".unity"] }"#)?;

    assert_cmd_snapshot!(test.check_command());

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("--help"));

    Ok(())
}
