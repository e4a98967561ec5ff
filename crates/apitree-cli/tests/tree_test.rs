//! `apitree tree` in headless mode.

use apitree_testing::{TestWorld, assertions, fixtures};
use anyhow::Result;

#[test]
fn test_print_sample_initial_state() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["tree", "--print"])?;
    assert!(result.success(), "tree failed: {}", result.stderr());

    let layout = result.json()?;
    let names = assertions::visible_names(&layout)?;
    assert_eq!(names.len(), 4);
    assert_eq!(names[0], "Root");

    // root sits mid-height at depth zero
    assert!((layout[0]["x"].as_f64().unwrap() - 280.0).abs() < 1e-9);
    assert_eq!(layout[0]["y"], 0.0);
    assert_eq!(layout[0]["disclosure"], "expanded");
    assert_eq!(layout[1]["disclosure"], "collapsed");
    assert_eq!(layout[1]["y"], 180.0);
    Ok(())
}

#[test]
fn test_print_expand_all_shows_every_node() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["tree", "--print", "--expand-all"])?;
    assert!(result.success(), "tree failed: {}", result.stderr());

    let layout = result.json()?;
    assert_eq!(assertions::visible_names(&layout)?.len(), 16);

    let mut ids: Vec<u64> = layout
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_u64().unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    Ok(())
}

#[test]
fn test_print_dataset_from_file() -> Result<()> {
    let world = TestWorld::new();
    let dataset = world.write_dataset("scenario.json", &fixtures::scenario_tree())?;
    let dataset = dataset.to_string_lossy().to_string();

    let result = world.run(&["tree", "--input", &dataset, "--print"])?;
    assert!(result.success(), "tree failed: {}", result.stderr());
    assert_eq!(
        assertions::visible_names(&result.json()?)?,
        vec!["root", "a", "b", "c"]
    );

    let result = world.run(&["tree", "--input", &dataset, "--print", "--expand-all"])?;
    assert_eq!(
        assertions::visible_names(&result.json()?)?,
        vec!["root", "a", "a1", "a2", "a2x", "a2y", "a3", "b", "c"]
    );
    Ok(())
}

#[test]
fn test_view_settings_come_from_config() -> Result<()> {
    let world = TestWorld::new();
    world.write_config("[view]\ndepth_step = 100.0\nheight = 440.0\n")?;

    let result = world.run(&["tree", "--print"])?;
    assert!(result.success(), "tree failed: {}", result.stderr());

    let layout = result.json()?;
    assert!((layout[0]["x"].as_f64().unwrap() - 200.0).abs() < 1e-9);
    assert_eq!(layout[1]["y"], 100.0);
    Ok(())
}

#[test]
fn test_missing_dataset_fails() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["tree", "--input", "nope.json", "--print"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("failed to load tree dataset nope.json"));
    Ok(())
}

#[test]
fn test_malformed_dataset_fails() -> Result<()> {
    let world = TestWorld::new();
    std::fs::write(world.path("bad.json"), r#"{"children": []}"#)?;

    let result = world.run(&["tree", "--input", "bad.json", "--print"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("Invalid tree dataset"));
    Ok(())
}

#[test]
fn test_interactive_mode_requires_terminal() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["tree"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("use --print"));
    Ok(())
}
