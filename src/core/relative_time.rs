// ElasChat - core/relative_time.rs
//
// Relative age labels ("Just now", "5m ago", "3h ago", "2d ago") with an
// absolute-date fallback for older timestamps.
// Core layer: pure logic given `now`; only `time_ago_now` reads the clock.

use crate::util::constants::{
    DEFAULT_DATE_FORMAT, DEFAULT_RELATIVE_DAYS, JUST_NOW_LABEL, MS_PER_DAY, MS_PER_HOUR,
    MS_PER_MINUTE,
};
use crate::util::error::FormatError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Write;

/// Layouts with an offset accepted after RFC 3339 fails: a space separator,
/// an offset without a colon (`+0200`), or a time without seconds.
/// `%#z` also takes `Z`.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Offset-less date-time layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layout, interpreted as midnight UTC.
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// How old timestamps are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAgoOptions {
    /// strftime pattern for timestamps outside the relative window.
    pub date_format: String,

    /// Ages of this many days or more render as an absolute date.
    pub relative_days: i64,
}

impl Default for TimeAgoOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            relative_days: DEFAULT_RELATIVE_DAYS,
        }
    }
}

/// Parse an ISO-8601 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, FormatError> {
    let text = raw.trim();

    let rfc_err = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_ONLY_FORMAT) {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(FormatError::InvalidTimestamp {
        raw: raw.to_string(),
        source: rfc_err,
    })
}

/// Relative age of `raw` as seen at `now`, using default options.
pub fn time_ago(raw: &str, now: DateTime<Utc>) -> Result<String, FormatError> {
    time_ago_with(raw, now, &TimeAgoOptions::default())
}

/// Relative age of `raw` as seen from the system clock.
pub fn time_ago_now(raw: &str) -> Result<String, FormatError> {
    time_ago(raw, Utc::now())
}

/// Relative age of `raw` as seen at `now`.
///
/// Buckets are checked in order and the first match wins. Timestamps in the
/// future are clamped to "Just now".
pub fn time_ago_with(
    raw: &str,
    now: DateTime<Utc>,
    options: &TimeAgoOptions,
) -> Result<String, FormatError> {
    let then = parse_timestamp(raw)?;
    let diff_ms = (now - then).num_milliseconds().max(0);

    let label = if diff_ms < MS_PER_MINUTE {
        JUST_NOW_LABEL.to_string()
    } else if diff_ms < MS_PER_HOUR {
        format!("{}m ago", diff_ms / MS_PER_MINUTE)
    } else if diff_ms < MS_PER_DAY {
        format!("{}h ago", diff_ms / MS_PER_HOUR)
    } else if diff_ms < options.relative_days.saturating_mul(MS_PER_DAY) {
        format!("{}d ago", diff_ms / MS_PER_DAY)
    } else {
        absolute_date(then, &options.date_format)
    };
    Ok(label)
}

/// Relative age for display; falls back to the raw text when unparseable.
pub fn display_time_ago(raw: &str, now: DateTime<Utc>, options: &TimeAgoOptions) -> String {
    match time_ago_with(raw, now, options) {
        Ok(label) => label,
        Err(e) => {
            tracing::debug!(error = %e, "Showing raw timestamp text");
            raw.to_string()
        }
    }
}

/// Render `when` with `date_format`, or the default pattern if it is invalid.
fn absolute_date(when: DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", when.format(date_format)).is_err() {
        tracing::warn!(format = date_format, "Invalid date format; using default");
        out.clear();
        out.push_str(&when.format(DEFAULT_DATE_FORMAT).to_string());
    }
    out
}
