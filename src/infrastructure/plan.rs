//! Plan file loading.
//!
//! Plans are YAML or JSON, decided by extension. Loading is a CLI-edge
//! concern, so errors are `anyhow` with context rather than domain errors.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::domain::models::Plan;

/// Read a [`Plan`] from a `.yaml`/`.yml` or `.json` file.
pub fn load_plan(path: &Path) -> Result<Plan> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid YAML plan in {}", path.display())),
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("Invalid JSON plan in {}", path.display())),
        other => bail!(
            "Unsupported plan extension '{other}' for {}; expected .yaml, .yml, or .json",
            path.display()
        ),
    }
}
