//! Helper functions exposed to templates by name.
//!
//! Presentation logic lives here rather than on [`crate::Snippet`], so the
//! domain type stays free of formatting concerns.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tera::{Result as TeraResult, Tera, Value};

/// Register every helper on a fresh engine instance.
pub fn register(tera: &mut Tera) {
    tera.register_filter("human_date", human_date);
}

/// Format a timestamp as `02 Jan 2026 at 15:04` (UTC).
pub fn format_human_date(ts: DateTime<Utc>) -> String {
    ts.format("%d %b %Y at %H:%M").to_string()
}

/// `{{ snippet.created | human_date }}`
///
/// Accepts an RFC 3339 string, which is how snippet timestamps serialize.
/// An empty string renders as empty.
pub fn human_date(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("human_date filter requires a timestamp string"))?;

    if raw.is_empty() {
        return Ok(Value::String(String::new()));
    }

    let ts = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| tera::Error::msg(format!("human_date filter: invalid timestamp {raw:?}: {e}")))?;

    Ok(Value::String(format_human_date(ts.with_timezone(&Utc))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_human_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 17, 10, 15, 0).unwrap();
        assert_eq!(format_human_date(ts), "17 Mar 2024 at 10:15");
    }

    #[test]
    fn test_human_date_converts_offsets_to_utc() {
        let value = Value::String("2024-03-17T12:15:00+02:00".into());
        let out = human_date(&value, &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("17 Mar 2024 at 10:15".into()));
    }

    #[test]
    fn test_human_date_empty() {
        let out = human_date(&Value::String(String::new()), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String(String::new()));
    }

    #[test]
    fn test_human_date_rejects_garbage() {
        assert!(human_date(&Value::String("yesterday".into()), &HashMap::new()).is_err());
        assert!(human_date(&Value::Bool(true), &HashMap::new()).is_err());
    }
}
