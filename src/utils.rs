use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

pub const UNKNOWN_DATETIME: &str = "不明";

// Asia/Tokyo has no DST, so a fixed offset is exact.
const JST_OFFSET_SECS: i32 = 9 * 3600;
const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Render an upstream timestamp as Tokyo wall-clock time.
/// Returns [`UNKNOWN_DATETIME`] for anything it cannot read.
pub fn format_datetime(value: Option<&Value>) -> String {
    parse_datetime(value)
        .and_then(|datetime| {
            let tokyo = FixedOffset::east_opt(JST_OFFSET_SECS)?;
            Some(datetime.with_timezone(&tokyo).format(DISPLAY_FORMAT).to_string())
        })
        .unwrap_or_else(|| UNKNOWN_DATETIME.to_string())
}

fn parse_datetime(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(text) => parse_datetime_str(text.trim()),
        // Epoch milliseconds
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_datetime_str(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
