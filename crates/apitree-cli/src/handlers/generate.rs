use crate::presentation::console;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use apitree_collection::{CollectionConfig, CollectionSettings, Profile, build, write_artifacts};
use std::path::PathBuf;

/// Command-line values; each one beats the environment and the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub collection_name: Option<String>,
    pub build_number: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub profile: Option<Profile>,
}

impl Overrides {
    fn apply(self, config: &mut CollectionConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(collection_name) = self.collection_name {
            config.collection_name = collection_name;
        }
        if let Some(build_number) = self.build_number {
            config.build_number = build_number;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
    }
}

pub fn handle(settings: &CollectionSettings, overrides: Overrides, format: OutputFormat) -> Result<()> {
    let mut config = CollectionConfig::resolve(settings, |key| std::env::var(key).ok())?;
    overrides.apply(&mut config);

    let document = build(&config);
    tracing::debug!(
        profile = %config.profile,
        requests = document.request_count(),
        "collection built"
    );

    let artifacts = write_artifacts(&document, &config)
        .with_context(|| format!("failed to write artifacts to {}", config.output_dir.display()))?;

    match format {
        OutputFormat::Json => console::print_json(&artifacts.metadata),
        OutputFormat::Plain => {
            console::print_generation_banner(&document.info.name, &config, &artifacts);
            Ok(())
        }
    }
}
