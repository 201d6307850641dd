//! Validation options file

use anyhow::Context;
use std::{fs, path::Path};
use tokenmint_jwt::ValidationOptions;

/// Read [`ValidationOptions`] from a JSON file. Missing fields take their
/// defaults; `None` yields the defaults outright.
pub fn load_options(path: Option<&Path>) -> anyhow::Result<ValidationOptions> {
    let Some(path) = path else {
        return Ok(ValidationOptions::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid validation options in {}", path.display()))
}
