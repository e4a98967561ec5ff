//! Assertions over generated collections and printed layouts.

use anyhow::{Context, Result};
use serde_json::Value;

/// Every request item of a Postman collection, one folder level deep.
fn requests(collection: &Value) -> Result<Vec<&Value>> {
    let folders = collection["item"]
        .as_array()
        .context("Expected 'item' array in collection")?;

    let mut requests = Vec::new();
    for folder in folders {
        let items = folder["item"]
            .as_array()
            .context("Expected 'item' array in folder")?;
        requests.extend(items);
    }
    Ok(requests)
}

pub fn assert_request_count(collection: &Value, expected: usize) -> Result<()> {
    let count = requests(collection)?.len();
    if count != expected {
        anyhow::bail!("Expected {} requests, got {}", expected, count);
    }
    Ok(())
}

pub fn assert_urls_start_with(collection: &Value, base_url: &str) -> Result<()> {
    for request in requests(collection)? {
        let url = request["request"]["url"]
            .as_str()
            .with_context(|| format!("Request {} has no url", request["name"]))?;
        if !url.starts_with(base_url) {
            anyhow::bail!("URL {} does not start with {}", url, base_url);
        }
    }
    Ok(())
}

/// Names of the nodes printed by `tree --print`, in order.
pub fn visible_names(layout: &Value) -> Result<Vec<String>> {
    let nodes = layout.as_array().context("Expected a JSON array of nodes")?;
    nodes
        .iter()
        .map(|node| {
            node["name"]
                .as_str()
                .map(String::from)
                .context("Node without a name")
        })
        .collect()
}
