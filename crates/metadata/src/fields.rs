//! Lossy field readers shared by the provider normalizers.
//!
//! Upstream payloads are read as untyped JSON: a field that is missing, null,
//! or of an unexpected type reads as `None` instead of failing the record.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

/// Non-empty string value.
pub fn text(v: &Value) -> Option<String> {
    v.as_str().filter(|s| !s.is_empty()).map(|s| s.to_string())
}

/// Non-negative integer id, given either as a JSON number or a numeric string.
pub fn numeric_id(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

/// Small non-negative integer such as a season or episode number.
pub fn number(v: &Value) -> Option<u32> {
    v.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn date(v: &Value) -> Option<NaiveDate> {
    v.as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Widen a `YYYY-MM-DD` date to a midnight-UTC timestamp.
pub fn released(v: &Value) -> Option<String> {
    date(v).map(|d| format!("{}T00:00:00.000Z", d.format("%Y-%m-%d")))
}

/// Year of a `YYYY-MM-DD` date.
pub fn year(v: &Value) -> Option<i32> {
    date(v).map(|d| d.year())
}

/// Runtime in minutes rendered as `<n>m`.
pub fn runtime(v: &Value) -> Option<String> {
    v.as_u64().map(|m| format!("{m}m"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        assert_eq!(numeric_id(&json!(268)), Some(268));
        assert_eq!(numeric_id(&json!("81189")), Some(81189));
        assert_eq!(numeric_id(&json!("series-81189")), None);
        assert_eq!(numeric_id(&json!(null)), None);
        assert_eq!(numeric_id(&json!(-4)), None);
    }

    #[test]
    fn dates_widen_to_midnight_utc() {
        assert_eq!(
            released(&json!("2011-04-17")).as_deref(),
            Some("2011-04-17T00:00:00.000Z")
        );
        assert_eq!(year(&json!("2011-04-17")), Some(2011));
        assert_eq!(released(&json!("")), None);
        assert_eq!(released(&json!("2011")), None);
        assert_eq!(year(&json!(null)), None);
    }

    #[test]
    fn runtime_gets_minute_suffix() {
        assert_eq!(runtime(&json!(148)).as_deref(), Some("148m"));
        assert_eq!(runtime(&json!(null)), None);
    }

    #[test]
    fn empty_text_reads_as_absent() {
        assert_eq!(text(&json!("Batman")).as_deref(), Some("Batman"));
        assert_eq!(text(&json!("")), None);
        assert_eq!(text(&json!(42)), None);
    }
}
