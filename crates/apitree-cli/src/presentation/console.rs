use anyhow::Result;
use apitree_collection::{Artifacts, CollectionConfig, METADATA_FILE};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

const RULE: &str = "========================================";

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_generation_banner(name: &str, config: &CollectionConfig, artifacts: &Artifacts) {
    let color = std::io::stdout().is_terminal();
    for line in banner_lines(name, config, artifacts, color) {
        println!("{}", line);
    }
}

fn banner_lines(
    name: &str,
    config: &CollectionConfig,
    artifacts: &Artifacts,
    color: bool,
) -> Vec<String> {
    let title = "Postman Collection Generated Successfully";
    let field = |label: &str, value: String| field_line(label, &value, color);

    vec![
        RULE.to_string(),
        if color {
            title.green().bold().to_string()
        } else {
            title.to_string()
        },
        RULE.to_string(),
        field("Collection Name", name.to_string()),
        field("Build Number", config.build_number.clone()),
        field("Base URL", config.base_url.clone()),
        field("Profile", config.profile.to_string()),
        field("Requests", artifacts.metadata.request_count.to_string()),
        field("Output File", artifacts.collection_path.display().to_string()),
        RULE.to_string(),
        format!("Metadata file created: {}", METADATA_FILE),
    ]
}

fn field_line(label: &str, value: &str, color: bool) -> String {
    if color {
        format!("{} {}", format!("{}:", label).bold(), value.cyan())
    } else {
        format!("{}: {}", label, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apitree_collection::Metadata;
    use std::path::PathBuf;

    #[test]
    fn test_plain_banner() {
        let config = CollectionConfig::default();
        let artifacts = Artifacts {
            collection_path: PathBuf::from("build/api-collection.json"),
            metadata_path: PathBuf::from("build/collection-metadata.json"),
            metadata: Metadata {
                generated_at: "2024-01-01T00:00:00.000Z".to_string(),
                build_number: "dev".to_string(),
                base_url: config.base_url.clone(),
                collection_name: config.collection_name.clone(),
                request_count: 5,
                file_name: "build/api-collection.json".to_string(),
            },
        };

        let lines = banner_lines("Generated API Collection - Build dev", &config, &artifacts, false);

        insta::assert_snapshot!(lines.join("\n"), @r"
        ========================================
        Postman Collection Generated Successfully
        ========================================
        Collection Name: Generated API Collection - Build dev
        Build Number: dev
        Base URL: https://jsonplaceholder.typicode.com
        Profile: standard
        Requests: 5
        Output File: build/api-collection.json
        ========================================
        Metadata file created: collection-metadata.json
        ");
    }
}
