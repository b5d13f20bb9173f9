use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by chat exports: second precision, no timezone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an export timestamp string into a naive calendar datetime.
pub fn parse_timestamp(raw: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// One message as it appears in an exported archive.
///
/// `Contents` and `Timestamp` are the fields the pipeline reads; everything
/// else the export carries is kept verbatim in `extra` so enriched copies
/// round-trip the original record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(rename = "Contents", default)]
    pub contents: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MessageRecord {
    pub fn new(contents: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            timestamp: timestamp.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Messages with no text are excluded from every count downstream.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Sentiment of a single piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// -1 (negative) to +1 (positive); exactly 0 reads as neutral.
    pub polarity: f64,
    /// 0 (factual) to 1 (opinion-laden).
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        polarity: 0.0,
        subjectivity: 0.0,
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("scorer cannot process text: {0}")]
    Unprocessable(String),
}

// Object style note:
// Scorers are stateless oracles. Implementations typically declare an empty
// or configuration-only struct and keep `score` pure, so any scorer can stand
// in for any other without changing what the aggregation produces.

/// Maps message text to a sentiment score.
pub trait SentimentScorer: Send + Sync {
    fn scorer_name(&self) -> &str;

    fn score(&self, text: &str) -> Result<Sentiment, ScoreError>;
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for Box<S> {
    fn scorer_name(&self) -> &str {
        (**self).scorer_name()
    }

    fn score(&self, text: &str) -> Result<Sentiment, ScoreError> {
        (**self).score(text)
    }
}
