pub mod analyzer;
pub mod charts;
pub mod lexicon;
pub mod period;
pub mod store;
pub mod types;

pub use analyzer::{Aggregation, AnalyzerConfig, Bucket, SentimentAnalyzer, SentimentTally, TimestampPolicy};
pub use charts::ChartConfig;
pub use lexicon::LexiconScorer;
pub use period::{BucketKey, Period, WEEKDAYS};
pub use types::{
    AnalyzerError, EnrichedMessage, OverallStats, Result, SentimentReport, TimeSeriesEntry,
    TimeSlot,
};
