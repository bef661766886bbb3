use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, MOVER_GUID, MOVER_SOURCE, YAML_ERROR_FILTER, ship_scene};

#[test]
fn test_prints_tree() -> Result<()> {
    let test = CliTest::new()?;
    test.write_component("Assets/Mover.cs", MOVER_GUID, MOVER_SOURCE)?;
    test.write_file("Assets/Main.unity", &ship_scene(None))?;

    assert_cmd_snapshot!(test.hierarchy_command());

    Ok(())
}

#[test]
fn test_missing_names_use_placeholder() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Assets/Bare.unity",
        "--- !u!1 &7\nGameObject:\n  m_Component:\n  - component: {fileID: 8}\n--- !u!4 &8\nTransform:\n  m_Father: {fileID: 0}\n",
    )?;

    assert_cmd_snapshot!(test.hierarchy_command());

    Ok(())
}

#[test]
fn test_missing_transform_falls_back_to_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Assets/Partial.unity",
        "--- !u!1 &1
GameObject:
  m_Component:
  - component: {fileID: 11}
  m_Name: Parent
--- !u!4 &11
Transform:
  m_Children:
  - {fileID: 12}
  m_Father: {fileID: 0}
--- !u!1 &2
GameObject:
  m_Component:
  - component: {fileID: 12}
  m_Name: Lost
",
    )?;

    assert_cmd_snapshot!(test.hierarchy_command());

    Ok(())
}

#[test]
fn test_scenes_are_listed_in_path_order() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Assets/Zeta.unity", &ship_scene(None))?;
    test.write_file("Assets/Alpha.unity", "")?;

    assert_cmd_snapshot!(test.hierarchy_command());

    Ok(())
}

#[test]
fn test_unreadable_scene_is_reported() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Assets/Main.unity", &ship_scene(None))?;
    test.write_file("Assets/Broken.unity", "--- !u!1 &1\nGameObject: [\n")?;

    insta::with_settings!({filters => vec![YAML_ERROR_FILTER]}, {
        assert_cmd_snapshot!(test.hierarchy_command());
    });

    Ok(())
}
