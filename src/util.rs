use crate::error::{ChurnlogError, Result};
use crate::model::DateRange;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::time::Duration;

pub fn date_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

pub fn resolve_range(since: Option<&str>, until: Option<&str>, now: DateTime<Utc>) -> Result<DateRange> {
    let mut range = DateRange::new();

    let since_dt = since.map(|s| parse_date(s, now)).transpose()?;
    let until_dt = until.map(|u| parse_date(u, now)).transpose()?;

    if let (Some(s), Some(u)) = (since_dt, until_dt) {
        if s > u {
            return Err(ChurnlogError::InvalidDate(format!(
                "Invalid range: since ({}) is after until ({})",
                s, u
            )));
        }
    }

    if let Some(s) = since_dt {
        range = range.with_since(s);
    }
    if let Some(u) = until_dt {
        range = range.with_until(u);
    }

    Ok(range)
}

/// Accepts RFC3339, `YYYY-MM-DD`, "N days ago" style phrases, or a
/// humantime duration such as `90d` or `-2weeks` counted back from `now`.
pub fn parse_date(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    let duration = parse_natural_duration(input)
        .or_else(|| humantime::parse_duration(input.trim().trim_start_matches('-')).ok())
        .ok_or_else(|| ChurnlogError::InvalidDate(format!("Unrecognized date '{input}'")))?;

    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| now.checked_sub_signed(d))
        .ok_or_else(|| ChurnlogError::InvalidDate(format!("Duration overflow for '{input}'")))
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    if let Some(days) = input.strip_suffix(" days ago") {
        if let Ok(n) = days.trim().parse::<u64>() {
            return n.checked_mul(86400).map(Duration::from_secs);
        }
    }

    if let Some(weeks) = input.strip_suffix(" weeks ago") {
        if let Ok(n) = weeks.trim().parse::<u64>() {
            return n.checked_mul(7 * 86400).map(Duration::from_secs);
        }
    }

    if let Some(months) = input.strip_suffix(" months ago") {
        if let Ok(n) = months.trim().parse::<u64>() {
            return n.checked_mul(30 * 86400).map(Duration::from_secs);
        }
    }

    None
}
