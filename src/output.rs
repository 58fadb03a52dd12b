use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::records::TalkRecord;

/// Encode all records as one JSON array.
pub fn to_json(records: &[TalkRecord]) -> Result<Vec<u8>> {
    serde_json::to_vec(records).context("Failed to serialize talks")
}

/// Write encoded output, replacing any existing file.
pub fn save(path: &Path, json: &[u8]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}
