//! Postman collection generation for build pipelines.
//!
//! The collection is a fixed set of request descriptions with pre-attached
//! response assertions. Only the base URL, the collection name, the build
//! number and the selected [`Profile`] vary between runs; everything else
//! is literal data.
//!
//! ```no_run
//! use apitree_collection::{CollectionConfig, build, write_artifacts};
//!
//! let config = CollectionConfig::from_env()?;
//! let document = build(&config);
//! let artifacts = write_artifacts(&document, &config)?;
//! println!("{} requests", artifacts.metadata.request_count);
//! # Ok::<(), apitree_collection::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod metadata;
pub mod model;
pub mod profile;
pub mod script;
pub mod writer;

pub use builder::{CollectionBuilder, POSTMAN_SCHEMA, build, serialize};
pub use config::{CollectionConfig, CollectionSettings};
pub use error::{Error, Result};
pub use metadata::{Metadata, summarize};
pub use model::*;
pub use profile::Profile;
pub use script::TestScript;
pub use writer::{Artifacts, COLLECTION_FILE, METADATA_FILE, write_artifacts};
