use std::fmt::Display;

use chrono::{DateTime, FixedOffset, TimeZone};

/// Drawn in place of the time when the host hands over a timestamp that cannot be represented.
pub const TIME_PLACEHOLDER: &str = "-- -- --";

/// Format as 24-hour `"HH MM SS"`, zero padded.
pub fn format_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%H %M %S").to_string()
}

/// Format epoch milliseconds in `offset`, falling back to [`TIME_PLACEHOLDER`] out of range.
pub fn format_epoch_millis(epoch_ms: i64, offset: FixedOffset) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(utc) => format_time(&utc.with_timezone(&offset)),
        None => {
            tracing::debug!(epoch_ms, "timestamp out of range, drawing placeholder");
            TIME_PLACEHOLDER.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/face/time_text.rs"]
mod tests;
