//! `apitree generate` end to end: configuration precedence, artifacts and
//! console output.

use apitree_testing::{TestWorld, assertions, fixtures};
use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_defaults_write_both_artifacts() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["generate"])?;

    assert!(result.success(), "generate failed: {}", result.stderr());
    assert!(result.stdout().contains("Postman Collection Generated Successfully"));
    assert!(result.stdout().contains("Metadata file created: collection-metadata.json"));

    let collection = world.read_json("build/api-collection.json")?;
    assertions::assert_request_count(&collection, 5)?;
    assertions::assert_urls_start_with(&collection, "https://jsonplaceholder.typicode.com")?;
    assert_eq!(
        collection["info"]["name"],
        "Generated API Collection - Build dev"
    );

    let metadata = world.read_json("build/collection-metadata.json")?;
    assert_eq!(metadata["requestCount"], 5);
    assert_eq!(metadata["buildNumber"], "dev");
    Ok(())
}

#[test]
fn test_environment_configures_generation() -> Result<()> {
    let world = TestWorld::new()
        .with_env("API_BASE_URL", "http://localhost:8080")
        .with_env("BUILD_NUMBER", "1234")
        .with_env("COLLECTION_NAME", "Nightly")
        .with_env("OUTPUT_DIR", "out");

    let result = world.run(&["generate"])?;
    assert!(result.success(), "generate failed: {}", result.stderr());

    let collection = world.read_json("out/api-collection.json")?;
    assertions::assert_urls_start_with(&collection, "http://localhost:8080")?;
    assert_eq!(collection["info"]["name"], "Nightly - Build 1234");
    assert_eq!(collection["variable"][0]["value"], "http://localhost:8080");
    assert_eq!(collection["variable"][1]["value"], "1234");

    let metadata = world.read_json("out/collection-metadata.json")?;
    assert_eq!(metadata["collectionName"], "Nightly");
    assert_eq!(metadata["baseUrl"], "http://localhost:8080");
    Ok(())
}

#[test]
fn test_flags_beat_environment() -> Result<()> {
    let world = TestWorld::new()
        .with_env("BUILD_NUMBER", "from-env")
        .with_env("COLLECTION_PROFILE", "standard");

    let result = world.run(&["generate", "--build-number", "from-flag", "--profile", "extended"])?;
    assert!(result.success(), "generate failed: {}", result.stderr());

    let collection = world.read_json("build/api-collection.json")?;
    assert_eq!(collection["info"]["name"], "Generated API Collection - Build from-flag");
    assertions::assert_request_count(&collection, 6)?;
    Ok(())
}

#[test]
fn test_config_file_and_environment_precedence() -> Result<()> {
    let world = TestWorld::new();
    world.write_config(fixtures::EXTENDED_CONFIG)?;

    let result = world.run(&["generate"])?;
    assert!(result.success(), "generate failed: {}", result.stderr());
    let collection = world.read_json("artifacts/api-collection.json")?;
    assertions::assert_request_count(&collection, 6)?;
    assert_eq!(collection["info"]["name"], "Staging Smoke Tests - Build dev");

    let world = world.with_env("COLLECTION_PROFILE", "standard");
    let result = world.run(&["generate"])?;
    assert!(result.success(), "generate failed: {}", result.stderr());
    let collection = world.read_json("artifacts/api-collection.json")?;
    assertions::assert_request_count(&collection, 5)?;
    Ok(())
}

#[test]
fn test_json_format_prints_metadata() -> Result<()> {
    let world = TestWorld::new().with_env("BUILD_NUMBER", "7");

    let result = world.run(&["generate", "--format", "json"])?;
    assert!(result.success(), "generate failed: {}", result.stderr());

    let metadata = result.json()?;
    assert_eq!(metadata["buildNumber"], "7");
    assert_eq!(metadata["requestCount"], 5);
    assert!(
        metadata["fileName"]
            .as_str()
            .unwrap()
            .ends_with("api-collection.json")
    );
    assert!(metadata["generatedAt"].as_str().unwrap().ends_with('Z'));
    Ok(())
}

#[test]
fn test_repeated_runs_keep_structure() -> Result<()> {
    let world = TestWorld::new();

    world.run(&["generate"])?;
    let first = world.read_json("build/api-collection.json")?;
    world.run(&["generate"])?;
    let second = world.read_json("build/api-collection.json")?;

    // only the id and the embedded timestamp change between runs
    assert_eq!(first["item"], second["item"]);
    assert_eq!(first["event"], second["event"]);
    assert_eq!(first["variable"], second["variable"]);
    assert_ne!(first["info"]["_postman_id"], second["info"]["_postman_id"]);
    Ok(())
}

#[test]
fn test_unwritable_output_dir_fails() -> Result<()> {
    let world = TestWorld::new();
    std::fs::write(world.path("blocked"), "not a directory")?;

    let mut cmd = cargo_bin_cmd!("apitree");
    world
        .configure_command(&mut cmd)
        .args(["generate", "--output-dir", "blocked"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: failed to write artifacts to blocked"));
    Ok(())
}

#[test]
fn test_unknown_profile_in_environment_fails() -> Result<()> {
    let world = TestWorld::new().with_env("COLLECTION_PROFILE", "everything");

    let result = world.run(&["generate"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("unknown profile 'everything'"));
    assert!(!world.path("build").exists());
    Ok(())
}
