//! Declarative test environment for running the `apitree` binary.

use anyhow::{Context, Result};
use apitree_collection::config::{
    ENV_BASE_URL, ENV_BUILD_NUMBER, ENV_COLLECTION_NAME, ENV_OUTPUT_DIR, ENV_PROFILE,
};
use apitree_hierarchy::Node;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads; cleared before every run so the host
/// environment cannot leak into a test.
const INHERITED_VARS: [&str; 6] = [
    ENV_BASE_URL,
    ENV_COLLECTION_NAME,
    ENV_BUILD_NUMBER,
    ENV_OUTPUT_DIR,
    ENV_PROFILE,
    "RUST_LOG",
];

/// Isolated working directory plus environment for CLI runs.
///
/// # Example
/// ```no_run
/// use apitree_testing::TestWorld;
///
/// let world = TestWorld::new().with_env("BUILD_NUMBER", "42");
/// let result = world.run(&["generate"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cwd: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            cwd: temp_dir.path().to_path_buf(),
            temp_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Path relative to the working directory.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(relative)
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `apitree.toml` into the working directory.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.path("apitree.toml");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Serialize `root` as a dataset file in the working directory.
    pub fn write_dataset(&self, name: &str, root: &Node) -> Result<PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_vec_pretty(root)?)?;
        Ok(path)
    }

    pub fn read_json(&self, relative: impl AsRef<Path>) -> Result<serde_json::Value> {
        let path = self.path(relative);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Point `cmd` at this world's directory and environment.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(&self.cwd);
        for key in INHERITED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run the `apitree` binary with `args` and capture its output.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("apitree")
            .map_err(|e| anyhow::anyhow!("Failed to find apitree binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
