use interfaces::{MessageRecord, Sentiment};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("unparseable timestamp {raw:?}: {source}")]
    ParseTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown period {0:?}")]
    UnknownPeriod(String),

    #[error("scoring failed: {0}")]
    Scoring(#[from] interfaces::ScoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// A message record with its sentiment attached. The original record is
/// embedded unchanged; serialization flattens it so the enriched copy looks
/// like the export record plus two score fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedMessage {
    #[serde(flatten)]
    pub record: MessageRecord,
    pub polarity: f64,
    pub subjectivity: f64,
}

impl EnrichedMessage {
    pub fn new(record: MessageRecord, sentiment: Sentiment) -> Self {
        Self {
            record,
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
        }
    }
}

/// Run-wide statistics over every scored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub message_count: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub net_sentiment: i64,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
}

/// Which slot of the series an entry describes: a single calendar key, or a
/// weekday/hour pair for the gap-filled weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSlot {
    Period { date: String },
    WeekdayHour { weekday: String, hour: String },
}

impl TimeSlot {
    pub fn label(&self) -> String {
        match self {
            TimeSlot::Period { date } => date.clone(),
            TimeSlot::WeekdayHour { weekday, hour } => format!("{weekday} {hour}"),
        }
    }
}

/// One finalized bucket snapshot in the output series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesEntry {
    #[serde(flatten)]
    pub slot: TimeSlot,
    pub message_count: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub net_sentiment: i64,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
}

impl TimeSeriesEntry {
    /// Explicit zero entry for a slot that received no messages.
    pub fn zero(slot: TimeSlot) -> Self {
        Self {
            slot,
            message_count: 0,
            positive_count: 0,
            negative_count: 0,
            neutral_count: 0,
            net_sentiment: 0,
            average_polarity: 0.0,
            average_subjectivity: 0.0,
        }
    }
}

/// The JSON-serializable result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub overall_stats: OverallStats,
    pub time_series: Vec<TimeSeriesEntry>,
}
