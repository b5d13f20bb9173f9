pub mod defs;
pub mod neutral;

pub use defs::{
    MessageRecord, ScoreError, Sentiment, SentimentScorer, TIMESTAMP_FORMAT, parse_timestamp,
};
pub use neutral::NeutralScorer;
