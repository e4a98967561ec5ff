use anyhow::{Context, Result};
use apitree_collection::CollectionSettings;
use apitree_hierarchy::ViewConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of `apitree.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Config {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }
}
