// Date helpers for fixture dates and day counts

use chrono::{Local, NaiveDate, TimeZone};
use anyhow::{Context, Result};

pub const SECS_PER_DAY: i64 = 86400;

/// Parse a calendar date (YYYY-MM-DD) to the Unix timestamp of local midnight
pub fn parse_date(expr: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(expr.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD.", expr))?;
    let datetime = date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;
    let local_dt = Local.from_local_datetime(&datetime)
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("Ambiguous date: {}", expr))?;
    Ok(local_dt.timestamp())
}

/// Whole days elapsed between `since` and `now`, floored and clamped at 0
pub fn days_since(since: i64, now: i64) -> u32 {
    let days = (now - since).max(0) / SECS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Timestamp `days` whole days before `now`
pub fn days_ago(days: u32, now: i64) -> i64 {
    now - i64::from(days) * SECS_PER_DAY
}

/// Format a timestamp as a local calendar date
pub fn format_date(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}
