use chrono::{DateTime, SecondsFormat, Utc};

pub struct TimestampManager;

impl TimestampManager {
    /// Generate current timestamp in milliseconds
    pub fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Id for a game submitted at `now`, strictly newer than `previous`.
    pub fn game_id(now: i64, previous: Option<i64>) -> i64 {
        match previous {
            Some(prev) if !Self::is_newer(now, prev) => prev + 1,
            _ => now,
        }
    }

    /// Check if timestamp is newer than a reference
    pub fn is_newer(timestamp: i64, reference: i64) -> bool {
        timestamp > reference
    }

    /// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T18:30:00.123Z`
    pub fn iso_date(timestamp: i64) -> String {
        DateTime::from_timestamp_millis(timestamp)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
