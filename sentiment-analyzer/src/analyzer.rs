use crate::period::{BucketKey, Period, WEEKDAYS, bucket_key, hour_label};
use crate::types::{
    EnrichedMessage, OverallStats, Result, SentimentReport, TimeSeriesEntry, TimeSlot,
};
use indicatif::ProgressBar;
use interfaces::{MessageRecord, SentimentScorer};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// How an unparseable timestamp is handled mid-pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampPolicy {
    /// Fail the whole run on the first bad timestamp.
    #[default]
    Abort,
    /// Log the offending message, drop it, keep going.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub timestamp_policy: TimestampPolicy,
    /// Show a progress bar over the scoring fold.
    pub progress: bool,
}

/// Classification counters shared by buckets and the overall stats. The
/// sign test is strict: polarity above zero is positive, below zero is
/// negative, exactly zero is neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub message_count: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub net_sentiment: i64,
}

impl SentimentTally {
    fn record(&mut self, polarity: f64) {
        self.message_count += 1;
        if polarity > 0.0 {
            self.positive_count += 1;
            self.net_sentiment += 1;
        } else if polarity < 0.0 {
            self.negative_count += 1;
            self.net_sentiment -= 1;
        } else {
            self.neutral_count += 1;
        }
    }
}

/// Accumulator for one bucket. Created lazily on the first message mapping
/// to its key, never deleted; `messages` keeps the enriched copies in input
/// order.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub tally: SentimentTally,
    pub total_polarity: f64,
    pub total_subjectivity: f64,
    pub messages: Vec<EnrichedMessage>,
}

impl Bucket {
    fn absorb(&mut self, enriched: EnrichedMessage) {
        self.tally.record(enriched.polarity);
        self.total_polarity += enriched.polarity;
        self.total_subjectivity += enriched.subjectivity;
        self.messages.push(enriched);
    }
}

/// Raw result of one aggregation pass, before ordering and averaging.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub period: Period,
    pub buckets: HashMap<BucketKey, Bucket>,
    pub overall: SentimentTally,
}

impl Aggregation {
    /// Compute averages and produce the ordered output series.
    ///
    /// Single-key periods emit only populated buckets, sorted in calendar
    /// order. The weekday/hour grid always emits all 7x24 slots, zero-filled
    /// where no bucket exists.
    pub fn finalize(self) -> SentimentReport {
        let total_polarity: f64 = self.buckets.values().map(|b| b.total_polarity).sum();
        let total_subjectivity: f64 = self.buckets.values().map(|b| b.total_subjectivity).sum();

        let overall_stats = OverallStats {
            message_count: self.overall.message_count,
            positive_count: self.overall.positive_count,
            negative_count: self.overall.negative_count,
            neutral_count: self.overall.neutral_count,
            net_sentiment: self.overall.net_sentiment,
            average_polarity: safe_average(total_polarity, self.overall.message_count),
            average_subjectivity: safe_average(total_subjectivity, self.overall.message_count),
        };

        let time_series = match self.period {
            Period::WeekdayHour => weekday_hour_series(&self.buckets),
            _ => sorted_series(self.buckets),
        };

        SentimentReport {
            overall_stats,
            time_series,
        }
    }
}

pub struct SentimentAnalyzer<S> {
    scorer: S,
    config: AnalyzerConfig,
}

impl<S: SentimentScorer> SentimentAnalyzer<S> {
    pub fn new(scorer: S) -> Self {
        Self::with_config(scorer, AnalyzerConfig::default())
    }

    pub fn with_config(scorer: S, config: AnalyzerConfig) -> Self {
        Self { scorer, config }
    }

    /// One sequential fold over the messages: score, derive the bucket key,
    /// classify, and update the bucket and the overall tally identically.
    /// Every non-empty message lands in exactly one bucket exactly once;
    /// empty messages are excluded from every count.
    pub fn aggregate(&self, messages: &[MessageRecord], period: Period) -> Result<Aggregation> {
        let mut buckets: HashMap<BucketKey, Bucket> = HashMap::new();
        let mut overall = SentimentTally::default();

        let bar = self
            .config
            .progress
            .then(|| ProgressBar::new(messages.len() as u64));

        for message in messages {
            if let Some(bar) = &bar {
                bar.inc(1);
            }
            if message.is_empty() {
                continue;
            }

            let sentiment = self.scorer.score(&message.contents)?;
            let key = match bucket_key(&message.timestamp, period) {
                Ok(key) => key,
                Err(err) if self.config.timestamp_policy == TimestampPolicy::Skip => {
                    warn!("Dropping message: {}", err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            buckets
                .entry(key)
                .or_default()
                .absorb(EnrichedMessage::new(message.clone(), sentiment));
            overall.record(sentiment.polarity);
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        debug!(
            "Aggregated {} messages into {} {} buckets",
            overall.message_count,
            buckets.len(),
            period
        );
        Ok(Aggregation {
            period,
            buckets,
            overall,
        })
    }

    /// Full run: aggregate and finalize.
    pub fn analyze(&self, messages: &[MessageRecord], period: Period) -> Result<SentimentReport> {
        info!(
            "Analyzing {} messages by {} with scorer {}",
            messages.len(),
            period,
            self.scorer.scorer_name()
        );
        Ok(self.aggregate(messages, period)?.finalize())
    }
}

fn safe_average(total: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

fn entry_from_bucket(slot: TimeSlot, bucket: &Bucket) -> TimeSeriesEntry {
    TimeSeriesEntry {
        slot,
        message_count: bucket.tally.message_count,
        positive_count: bucket.tally.positive_count,
        negative_count: bucket.tally.negative_count,
        neutral_count: bucket.tally.neutral_count,
        net_sentiment: bucket.tally.net_sentiment,
        average_polarity: safe_average(bucket.total_polarity, bucket.tally.message_count),
        average_subjectivity: safe_average(bucket.total_subjectivity, bucket.tally.message_count),
    }
}

fn sorted_series(buckets: HashMap<BucketKey, Bucket>) -> Vec<TimeSeriesEntry> {
    let mut keyed: Vec<(BucketKey, Bucket)> = buckets.into_iter().collect();
    keyed.sort_by(|(a, _), (b, _)| a.chronological_order().cmp(&b.chronological_order()));
    keyed
        .into_iter()
        .map(|(key, bucket)| {
            entry_from_bucket(TimeSlot::Period { date: key.label() }, &bucket)
        })
        .collect()
}

fn weekday_hour_series(buckets: &HashMap<BucketKey, Bucket>) -> Vec<TimeSeriesEntry> {
    let mut series = Vec::with_capacity(WEEKDAYS.len() * 24);
    for weekday in WEEKDAYS {
        for hour in 0..24 {
            let key = BucketKey::WeekdayHour(weekday, hour_label(hour));
            let slot = TimeSlot::WeekdayHour {
                weekday: weekday.to_string(),
                hour: hour_label(hour),
            };
            let entry = match buckets.get(&key) {
                Some(bucket) => entry_from_bucket(slot, bucket),
                None => TimeSeriesEntry::zero(slot),
            };
            series.push(entry);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_zero_polarity_counts_as_neutral() {
        let mut tally = SentimentTally::default();
        tally.record(0.0);
        tally.record(0.4);
        tally.record(-0.4);
        assert_eq!(tally.neutral_count, 1);
        assert_eq!(tally.positive_count, 1);
        assert_eq!(tally.negative_count, 1);
        assert_eq!(tally.net_sentiment, 0);
        assert_eq!(tally.message_count, 3);
    }

    #[test]
    fn zero_counts_average_to_zero_not_nan() {
        assert_eq!(safe_average(0.0, 0), 0.0);
        assert_eq!(safe_average(1.5, 3), 0.5);
    }
}
