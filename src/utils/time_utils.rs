use chrono::{DateTime, NaiveDate};

pub type AppInstant = std::time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const COMPACT_TIME_FORMAT: &str = "%Y%m%d";
    /// Epoch values above this are taken to be milliseconds.
    pub const EPOCH_MS_THRESHOLD: f64 = 1e12;
}

// Time Helper functions

pub fn epoch_sec_to_date_string(epoch_sec: i64) -> Option<String> {
    let dt = DateTime::from_timestamp(epoch_sec, 0)?;
    Some(dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
}

/// Seconds or milliseconds since the epoch, told apart by magnitude.
pub fn epoch_to_date_string(epoch: f64) -> Option<String> {
    if !epoch.is_finite() {
        return None;
    }
    let secs = if epoch.abs() > TimeUtils::EPOCH_MS_THRESHOLD {
        epoch / TimeUtils::MS_IN_S as f64
    } else {
        epoch
    };
    epoch_sec_to_date_string(secs.floor() as i64)
}

/// Reduce a time field to day resolution (`YYYY-MM-DD`).
///
/// Accepts a date, a date-prefixed timestamp (`2024-05-22 00:00:00-04:00`,
/// `2024-05-22T13:30:00Z`), a compact `YYYYMMDD` date or a numeric epoch.
/// Eight bare digits are always read as a compact date, never as an epoch.
/// Returns `None` otherwise.
pub fn normalize_day(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(raw, TimeUtils::COMPACT_TIME_FORMAT)
            .ok()
            .map(|d| d.format(TimeUtils::STANDARD_TIME_FORMAT).to_string());
    }
    if let Ok(epoch) = raw.parse::<f64>() {
        return epoch_to_date_string(epoch);
    }

    let prefix = raw.get(..10)?;
    let rest = &raw[10..];
    if !(rest.is_empty() || rest.starts_with([' ', 'T'])) {
        return None;
    }
    NaiveDate::parse_from_str(prefix, TimeUtils::STANDARD_TIME_FORMAT)
        .ok()
        .map(|d| d.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
}
