use crate::types::{Result, SentimentReport};
use interfaces::MessageRecord;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a combined message collection (a JSON array of records).
pub fn load_messages(path: &Path) -> Result<Vec<MessageRecord>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write a report as pretty-printed JSON, creating parent directories.
pub fn save_report(path: &Path, report: &SentimentReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    info!("Saved report to {}", path.display());
    Ok(())
}

pub fn load_report(path: &Path) -> Result<SentimentReport> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
