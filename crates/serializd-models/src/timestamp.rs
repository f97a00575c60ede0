use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::cmp::Ordering;

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Order two Serializd timestamps.
///
/// Compares instants when both sides parse (RFC 3339 or a bare date), lexically otherwise.
pub fn compare_timestamps(a: &str, b: &str) -> Ordering {
    match (parse_instant(a), parse_instant(b)) {
        (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// The earliest of a set of timestamps, returned verbatim.
pub fn earliest<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .min_by(|a, b| compare_timestamps(a, b))
}
