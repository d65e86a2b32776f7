//! Lenient date parsing for the mixed date encodings found in stored records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mongodb::bson::Bson;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Parse any date-like BSON value. Returns `None` for anything unrecognised.
///
/// Accepts BSON datetimes and timestamps, ISO-8601 / RFC 3339 strings,
/// a few day-first formats, epoch milliseconds (numeric or numeric string)
/// and extended-JSON `{"$date": ...}` wrappers.
pub fn parse_loose_date(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => Some(dt.to_chrono()),
        Bson::Timestamp(ts) => DateTime::from_timestamp(i64::from(ts.time), 0),
        Bson::Int32(ms) => DateTime::from_timestamp_millis(i64::from(*ms)),
        Bson::Int64(ms) => DateTime::from_timestamp_millis(*ms),
        Bson::Double(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
        Bson::String(s) => parse_date_str(s),
        Bson::Document(doc) => doc
            .get("$date")
            .or_else(|| doc.get("$numberLong"))
            .and_then(parse_loose_date),
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis);
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// Latest parseable candidate, or the Unix epoch when none parse.
pub fn effective_timestamp<'a, I>(candidates: I) -> DateTime<Utc>
where
    I: IntoIterator<Item = Option<&'a Bson>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter_map(parse_loose_date)
        .max()
        .unwrap_or(DateTime::UNIX_EPOCH)
}
