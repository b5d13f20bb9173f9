use crate::types::{ChannelArchive, ChannelInfo, IngestError, Result};
use interfaces::MessageRecord;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Walk an export root and load every channel directory found under it.
///
/// A directory counts as a channel when it contains both `channel.json`
/// (metadata) and `messages.json` (a JSON array of message records), the
/// layout chat exports use:
///
/// ```text
/// messages/
///   c<channel_id>/
///     channel.json
///     messages.json
/// ```
pub fn discover_channels(root: &Path) -> Result<Vec<ChannelArchive>> {
    let mut channels = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let channel_path = entry.path().join("channel.json");
        let messages_path = entry.path().join("messages.json");
        if !channel_path.is_file() || !messages_path.is_file() {
            continue;
        }

        let info: ChannelInfo = load_json(&channel_path)?;
        let messages: Vec<MessageRecord> = load_json(&messages_path)?;

        debug!(
            "Loaded channel {} with {} messages",
            entry.path().display(),
            messages.len()
        );
        channels.push(ChannelArchive { info, messages });
    }

    info!(
        "Discovered {} channels under {}",
        channels.len(),
        root.display()
    );
    Ok(channels)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn ignores_directories_without_both_channel_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let partial = dir.path().join("c1");
        fs::create_dir(&partial)?;
        fs::write(partial.join("channel.json"), r#"{"type": "DM"}"#)?;

        let channels = discover_channels(dir.path())?;
        assert!(channels.is_empty());
        Ok(())
    }

    #[test]
    fn loads_channel_metadata_and_messages() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let channel = dir.path().join("c42");
        fs::create_dir(&channel)?;
        fs::write(
            channel.join("channel.json"),
            r#"{"id": "42", "type": "GUILD_TEXT", "name": "general"}"#,
        )?;
        fs::write(
            channel.join("messages.json"),
            r#"[{"ID": 1, "Timestamp": "2024-01-01 10:00:00", "Contents": "hello", "Attachments": ""}]"#,
        )?;

        let channels = discover_channels(dir.path())?;
        assert_eq!(channels.len(), 1);
        assert!(!channels[0].info.is_dm());
        assert_eq!(channels[0].messages.len(), 1);
        assert_eq!(channels[0].messages[0].contents, "hello");
        // Fields the pipeline does not read survive the round trip.
        assert!(channels[0].messages[0].extra.contains_key("ID"));
        Ok(())
    }
}
