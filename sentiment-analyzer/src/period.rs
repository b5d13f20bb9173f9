use crate::types::{AnalyzerError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use interfaces::parse_timestamp;
use std::fmt;
use std::str::FromStr;

/// Weekly iteration order. Monday first, never lexical.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Time-bucketing granularity for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Month,
    Year,
    Weekday,
    Hour,
    WeekdayHour,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Day,
        Period::Month,
        Period::Year,
        Period::Weekday,
        Period::Hour,
        Period::WeekdayHour,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
            Period::Weekday => "weekday",
            Period::Hour => "hour",
            Period::WeekdayHour => "weekday_hour",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Period::Day),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "weekday" => Ok(Period::Weekday),
            "hour" => Ok(Period::Hour),
            // "day_hour" is the name older exports of this tool used
            "weekday_hour" | "day_hour" => Ok(Period::WeekdayHour),
            other => Err(AnalyzerError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Grouping key derived from a message timestamp under a period. Two
/// messages with equal keys under the same period share a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Date(String),
    Month(String),
    Year(String),
    Weekday(&'static str),
    Hour(String),
    WeekdayHour(&'static str, String),
}

impl BucketKey {
    /// Output label for single-key buckets (the `date` field on the wire).
    pub fn label(&self) -> String {
        match self {
            BucketKey::Date(s) | BucketKey::Month(s) | BucketKey::Year(s) | BucketKey::Hour(s) => {
                s.clone()
            }
            BucketKey::Weekday(name) => (*name).to_string(),
            BucketKey::WeekdayHour(name, hour) => format!("{name} {hour}"),
        }
    }

    /// Sort key consistent with calendar order. Digit-only keys order
    /// correctly as strings; weekdays need the fixed weekly rank.
    pub fn chronological_order(&self) -> (usize, &str) {
        match self {
            BucketKey::Date(s) | BucketKey::Month(s) | BucketKey::Year(s) | BucketKey::Hour(s) => {
                (0, s.as_str())
            }
            BucketKey::Weekday(name) => (weekday_rank(name), ""),
            BucketKey::WeekdayHour(name, hour) => (weekday_rank(name), hour.as_str()),
        }
    }
}

/// Position of a weekday name in the fixed weekly order; names outside the
/// table sort last.
pub fn weekday_rank(name: &str) -> usize {
    WEEKDAYS.iter().position(|w| *w == name).unwrap_or(WEEKDAYS.len())
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}")
}

/// Derive the bucket key for a raw export timestamp under `period`.
pub fn bucket_key(raw: &str, period: Period) -> Result<BucketKey> {
    let parsed = parse_raw(raw)?;
    Ok(key_for(parsed, period))
}

fn parse_raw(raw: &str) -> Result<NaiveDateTime> {
    parse_timestamp(raw).map_err(|source| AnalyzerError::ParseTimestamp {
        raw: raw.to_string(),
        source,
    })
}

fn key_for(parsed: NaiveDateTime, period: Period) -> BucketKey {
    match period {
        Period::Day => BucketKey::Date(parsed.format("%Y-%m-%d").to_string()),
        Period::Month => BucketKey::Month(parsed.format("%Y-%m").to_string()),
        Period::Year => BucketKey::Year(parsed.format("%Y").to_string()),
        Period::Weekday => BucketKey::Weekday(weekday_name(parsed.weekday())),
        Period::Hour => BucketKey::Hour(hour_label(parsed.hour())),
        Period::WeekdayHour => {
            BucketKey::WeekdayHour(weekday_name(parsed.weekday()), hour_label(parsed.hour()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01 was a Monday.
    const TS: &str = "2024-01-01 09:05:00";

    #[test]
    fn derives_one_key_per_period() {
        assert_eq!(
            bucket_key(TS, Period::Day).unwrap(),
            BucketKey::Date("2024-01-01".to_string())
        );
        assert_eq!(
            bucket_key(TS, Period::Month).unwrap(),
            BucketKey::Month("2024-01".to_string())
        );
        assert_eq!(
            bucket_key(TS, Period::Year).unwrap(),
            BucketKey::Year("2024".to_string())
        );
        assert_eq!(
            bucket_key(TS, Period::Weekday).unwrap(),
            BucketKey::Weekday("Monday")
        );
        assert_eq!(
            bucket_key(TS, Period::Hour).unwrap(),
            BucketKey::Hour("09".to_string())
        );
        assert_eq!(
            bucket_key(TS, Period::WeekdayHour).unwrap(),
            BucketKey::WeekdayHour("Monday", "09".to_string())
        );
    }

    #[test]
    fn hour_keys_are_two_digit_24h() {
        let key = bucket_key("2024-01-01 23:59:59", Period::Hour).unwrap();
        assert_eq!(key, BucketKey::Hour("23".to_string()));
        let key = bucket_key("2024-01-01 00:00:00", Period::Hour).unwrap();
        assert_eq!(key, BucketKey::Hour("00".to_string()));
    }

    #[test]
    fn rejects_timestamps_off_the_fixed_format() {
        let err = bucket_key("2024-01-01T09:05:00Z", Period::Day).unwrap_err();
        match err {
            AnalyzerError::ParseTimestamp { raw, .. } => {
                assert_eq!(raw, "2024-01-01T09:05:00Z");
            }
            other => panic!("expected ParseTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn weekday_order_is_weekly_not_lexical() {
        // "Friday" < "Monday" lexically; the weekly rank disagrees.
        assert!(weekday_rank("Monday") < weekday_rank("Friday"));
        let ranks: Vec<usize> = WEEKDAYS.iter().map(|w| weekday_rank(w)).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn period_names_round_trip() {
        for period in Period::ALL {
            assert_eq!(period.name().parse::<Period>().unwrap(), period);
        }
        assert_eq!("day_hour".parse::<Period>().unwrap(), Period::WeekdayHour);
        assert!("fortnight".parse::<Period>().is_err());
    }
}
