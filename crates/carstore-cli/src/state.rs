//! Local state file handling.
//!
//! The CLI stands in for an orchestrator: it persists at most one car
//! record between invocations and applies each command's state disposition
//! to that file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use carstore_core::CarRecord;

pub fn load(path: &Path) -> Result<Option<CarRecord>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    let record = serde_json::from_str(&content)
        .with_context(|| format!("State file {} is not a valid car record", path.display()))?;
    Ok(Some(record))
}

pub fn save(path: &Path, record: &CarRecord) -> Result<()> {
    let content =
        serde_json::to_string_pretty(record).context("Failed to serialize car record")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write state file {}", path.display()))
}

pub fn remove(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove state file {}", path.display()))?;
    }
    Ok(())
}
