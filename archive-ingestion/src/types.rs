use interfaces::MessageRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unparseable timestamp {raw:?}: {source}")]
    BadTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Channel metadata as stored in a channel directory's `channel.json`.
///
/// Only `type` is inspected; everything else is carried along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    #[serde(rename = "type", default)]
    pub channel_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChannelInfo {
    pub fn is_dm(&self) -> bool {
        self.channel_type.as_deref() == Some("DM")
    }
}

/// One channel directory: its metadata plus every message it holds.
#[derive(Debug, Clone)]
pub struct ChannelArchive {
    pub info: ChannelInfo,
    pub messages: Vec<MessageRecord>,
}

/// The three canonical collections the pipeline downstream consumes,
/// each sorted chronologically.
#[derive(Debug, Default)]
pub struct CombinedArchives {
    pub dm_messages: Vec<MessageRecord>,
    pub guild_messages: Vec<MessageRecord>,
    pub all_messages: Vec<MessageRecord>,
}
