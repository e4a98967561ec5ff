use crate::Result;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_COLLECTION_NAME: &str = "Generated API Collection";
pub const DEFAULT_BUILD_NUMBER: &str = "dev";
pub const DEFAULT_OUTPUT_DIR: &str = "build";

pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_COLLECTION_NAME: &str = "COLLECTION_NAME";
pub const ENV_BUILD_NUMBER: &str = "BUILD_NUMBER";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_PROFILE: &str = "COLLECTION_PROFILE";

/// `[collection]` section of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
    pub base_url: Option<String>,
    pub collection_name: Option<String>,
    pub build_number: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub profile: Option<Profile>,
}

/// Fully resolved generator inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub base_url: String,
    pub collection_name: String,
    pub build_number: String,
    pub output_dir: PathBuf,
    pub profile: Profile,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            build_number: DEFAULT_BUILD_NUMBER.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            profile: Profile::default(),
        }
    }
}

impl CollectionConfig {
    /// Resolve from the process environment alone.
    pub fn from_env() -> Result<Self> {
        Self::resolve(&CollectionSettings::default(), |key| std::env::var(key).ok())
    }

    /// Resolve each field as: environment variable, then config file, then default.
    ///
    /// Empty environment values count as unset.
    pub fn resolve<F>(settings: &CollectionSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();

        let profile = match env(ENV_PROFILE) {
            Some(raw) => raw.parse()?,
            None => settings.profile.unwrap_or(defaults.profile),
        };

        Ok(Self {
            base_url: env(ENV_BASE_URL)
                .or_else(|| settings.base_url.clone())
                .unwrap_or(defaults.base_url),
            collection_name: env(ENV_COLLECTION_NAME)
                .or_else(|| settings.collection_name.clone())
                .unwrap_or(defaults.collection_name),
            build_number: env(ENV_BUILD_NUMBER)
                .or_else(|| settings.build_number.clone())
                .unwrap_or(defaults.build_number),
            output_dir: env(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .or_else(|| settings.output_dir.clone())
                .unwrap_or(defaults.output_dir),
            profile,
        })
    }
}
