use crate::types::{LogLevel, OutputFormat, ProfileName};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apitree")]
#[command(about = "Generate Postman collections and browse tree datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file; a missing file means defaults
    #[arg(long, default_value = "apitree.toml", global = true)]
    pub config: PathBuf,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Overridden by RUST_LOG when set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the Postman collection and its metadata file
    Generate {
        /// Base URL substituted into every request [env: API_BASE_URL]
        #[arg(long)]
        base_url: Option<String>,

        /// [env: COLLECTION_NAME]
        #[arg(long)]
        collection_name: Option<String>,

        /// [env: BUILD_NUMBER]
        #[arg(long)]
        build_number: Option<String>,

        /// Directory receiving both files [env: OUTPUT_DIR]
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// [env: COLLECTION_PROFILE]
        #[arg(long)]
        profile: Option<ProfileName>,
    },

    /// Browse a tree dataset as a collapsible diagram
    Tree {
        /// JSON dataset of `{"name", "children"}` nodes; the built-in sample when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print the laid-out visible nodes as JSON instead of opening the viewer
        #[arg(long)]
        print: bool,

        /// Start with every node expanded
        #[arg(long)]
        expand_all: bool,
    },
}
