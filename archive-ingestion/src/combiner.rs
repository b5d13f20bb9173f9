use crate::archive_reader::discover_channels;
use crate::types::{ChannelArchive, CombinedArchives, IngestError, Result};
use chrono::NaiveDateTime;
use interfaces::{MessageRecord, parse_timestamp};
use std::fs;
use std::path::Path;
use tracing::info;

pub const DM_FILE: &str = "dm_messages.json";
pub const GUILD_FILE: &str = "guild_messages.json";
pub const ALL_FILE: &str = "all_messages.json";

/// Merge channel archives into the three canonical collections and sort
/// each chronologically.
pub fn combine(channels: Vec<ChannelArchive>) -> Result<CombinedArchives> {
    let mut combined = CombinedArchives::default();

    for channel in channels {
        if channel.info.is_dm() {
            combined.dm_messages.extend(channel.messages.iter().cloned());
        } else {
            combined.guild_messages.extend(channel.messages.iter().cloned());
        }
        combined.all_messages.extend(channel.messages);
    }

    sort_chronologically(&mut combined.dm_messages)?;
    sort_chronologically(&mut combined.guild_messages)?;
    sort_chronologically(&mut combined.all_messages)?;

    info!(
        "Combined {} DM, {} guild, {} total messages",
        combined.dm_messages.len(),
        combined.guild_messages.len(),
        combined.all_messages.len()
    );
    Ok(combined)
}

/// Sort messages by parsed timestamp, oldest first. The sort is stable, so
/// messages sharing a timestamp keep their archive order.
fn sort_chronologically(messages: &mut Vec<MessageRecord>) -> Result<()> {
    let mut keyed: Vec<(NaiveDateTime, MessageRecord)> = Vec::with_capacity(messages.len());
    for message in messages.drain(..) {
        let parsed =
            parse_timestamp(&message.timestamp).map_err(|source| IngestError::BadTimestamp {
                raw: message.timestamp.clone(),
                source,
            })?;
        keyed.push((parsed, message));
    }
    keyed.sort_by_key(|(parsed, _)| *parsed);
    messages.extend(keyed.into_iter().map(|(_, message)| message));
    Ok(())
}

/// Write the combined collections as pretty-printed JSON under `out_dir`,
/// creating the directory if needed.
pub fn write_combined(out_dir: &Path, combined: &CombinedArchives) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    write_messages(&out_dir.join(DM_FILE), &combined.dm_messages)?;
    write_messages(&out_dir.join(GUILD_FILE), &combined.guild_messages)?;
    write_messages(&out_dir.join(ALL_FILE), &combined.all_messages)?;
    Ok(())
}

fn write_messages(path: &Path, messages: &[MessageRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(messages).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json)?;
    info!("Wrote {} messages to {}", messages.len(), path.display());
    Ok(())
}

/// Full combining pass: discover channels under `source`, merge, sort, and
/// write the three collection files to `out_dir`.
pub fn combine_archives(source: &Path, out_dir: &Path) -> Result<CombinedArchives> {
    let channels = discover_channels(source)?;
    let combined = combine(channels)?;
    write_combined(out_dir, &combined)?;
    Ok(combined)
}

/// Number of messages in a combined collection file.
pub fn count_messages(path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)?;
    let messages: Vec<MessageRecord> =
        serde_json::from_str(&raw).map_err(|source| IngestError::Json {
            path: path.display().to_string(),
            source,
        })?;
    Ok(messages.len())
}
