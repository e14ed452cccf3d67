use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::model::LifecycleData;
use super::store::ContentStore;

pub const BUNDLED_LIFECYCLE_JSON: &str = include_str!("../../data/lifecycle.json");

pub fn parse_lifecycle_json(raw: &str) -> Result<LifecycleData> {
    let data: LifecycleData =
        serde_json::from_str(raw).context("invalid lifecycle JSON document")?;

    if data.phases.is_empty() {
        return Err(anyhow!("lifecycle document contains no phases"));
    }

    Ok(data)
}

pub fn read_lifecycle_file(path: &Path) -> Result<LifecycleData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read lifecycle data from {}", path.display()))?;

    parse_lifecycle_json(&raw)
        .with_context(|| format!("failed to parse lifecycle data in {}", path.display()))
}

/// Loads the document at `path`, or the bundled one, and indexes it.
pub fn load_store(path: Option<&Path>) -> Result<ContentStore> {
    let data = match path {
        Some(path) => read_lifecycle_file(path)?,
        None => parse_lifecycle_json(BUNDLED_LIFECYCLE_JSON)
            .context("failed to parse bundled lifecycle data")?,
    };

    let store = ContentStore::new(data).context("lifecycle tree failed validation")?;
    tracing::info!(
        phases = store.phases().len(),
        nodes = store.node_count(),
        key_processes = store.key_processes().len(),
        "loaded lifecycle content"
    );
    Ok(store)
}
