//! Timestamp parsing for backend values
//!
//! The backend stores `datetime.utcnow().isoformat()` strings: UTC wall-clock
//! time without an offset. Those are read as UTC regardless of the client's
//! time zone. Values carrying an offset are parsed as RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a backend timestamp, returning `None` for anything unrecognised
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    // "2024-05-01 10:00:00" is as common as the T-separated form
    let normalized = match raw.char_indices().nth(10) {
        Some((idx, ' ')) => format!("{}T{}", &raw[..idx], &raw[idx + 1..]),
        _ => raw.to_string(),
    };

    let naive = normalized.parse::<NaiveDateTime>().ok()?;
    Some(naive.and_utc())
}

/// Serde adapter for optional, leniently parsed timestamps
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339() {
        let ts = parse_timestamp("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T08:00:00+00:00");
    }

    #[test]
    fn test_naive_is_utc() {
        let ts = parse_timestamp("2024-05-01T10:00:00.123456").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T10:00:00.123456+00:00");
        assert_eq!(ts, parse_timestamp("2024-05-01T10:00:00.123456Z").unwrap());
    }

    #[test]
    fn test_space_separator() {
        assert_eq!(
            parse_timestamp("2024-05-01 10:00:00"),
            parse_timestamp("2024-05-01T10:00:00")
        );
    }

    #[test]
    fn test_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
