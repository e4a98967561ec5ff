use crate::Result;
use crate::builder::serialize;
use crate::config::CollectionConfig;
use crate::metadata::{Metadata, summarize};
use crate::model::CollectionDocument;
use std::fs;
use std::path::PathBuf;

pub const COLLECTION_FILE: &str = "api-collection.json";
pub const METADATA_FILE: &str = "collection-metadata.json";

/// Paths written by [`write_artifacts`] and the metadata that was stored.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub collection_path: PathBuf,
    pub metadata_path: PathBuf,
    pub metadata: Metadata,
}

/// Write the collection and its metadata into `config.output_dir`,
/// creating the directory first when it does not exist.
pub fn write_artifacts(document: &CollectionDocument, config: &CollectionConfig) -> Result<Artifacts> {
    fs::create_dir_all(&config.output_dir)?;

    let collection_path = config.output_dir.join(COLLECTION_FILE);
    fs::write(&collection_path, serialize(document)?)?;
    tracing::info!(path = %collection_path.display(), "wrote collection");

    let metadata = summarize(document, config, &collection_path);
    let metadata_path = config.output_dir.join(METADATA_FILE);
    fs::write(&metadata_path, serde_json::to_vec_pretty(&metadata)?)?;
    tracing::info!(path = %metadata_path.display(), "wrote metadata");

    Ok(Artifacts {
        collection_path,
        metadata_path,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_output_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = CollectionConfig {
            output_dir: temp_dir.path().join("nested/out"),
            ..Default::default()
        };
        let document = crate::build(&config);

        let artifacts = write_artifacts(&document, &config)?;

        assert!(artifacts.collection_path.ends_with("nested/out/api-collection.json"));
        assert!(artifacts.metadata_path.exists());

        let written = fs::read(&artifacts.collection_path)?;
        assert_eq!(written, serialize(&document)?);

        let metadata: Metadata = serde_json::from_slice(&fs::read(&artifacts.metadata_path)?)?;
        assert_eq!(metadata, artifacts.metadata);
        assert_eq!(metadata.request_count, 5);
        assert_eq!(
            metadata.file_name,
            artifacts.collection_path.display().to_string()
        );
        Ok(())
    }

    #[test]
    fn test_io_failure_propagates() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let blocker = temp_dir.path().join("occupied");
        fs::write(&blocker, b"not a directory")?;

        let config = CollectionConfig {
            output_dir: blocker,
            ..Default::default()
        };
        let document = crate::build(&config);

        let err = write_artifacts(&document, &config).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        Ok(())
    }
}
