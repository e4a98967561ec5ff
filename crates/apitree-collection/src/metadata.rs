use crate::builder::iso_timestamp;
use crate::config::CollectionConfig;
use crate::model::CollectionDocument;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of `collection-metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: String,
    pub build_number: String,
    pub base_url: String,
    pub collection_name: String,
    pub request_count: usize,
    pub file_name: String,
}

/// Describe `document` as written to `file_name`.
pub fn summarize(
    document: &CollectionDocument,
    config: &CollectionConfig,
    file_name: &Path,
) -> Metadata {
    Metadata {
        generated_at: iso_timestamp(&document.generated_at),
        build_number: config.build_number.clone(),
        base_url: config.base_url.clone(),
        collection_name: config.collection_name.clone(),
        request_count: document.request_count(),
        file_name: file_name.display().to_string(),
    }
}
