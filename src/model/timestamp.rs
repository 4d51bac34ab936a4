use chrono::prelude::*;

use crate::error::{Error, Result};

/// Sample timestamp, written to the output verbatim.
///
/// The helpers below follow the OpenMetrics text convention of Unix seconds.
pub type Timestamp = i64;

pub fn timestamp_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Timestamp {
    dt.timestamp()
}

pub fn now() -> Timestamp {
    Utc::now().timestamp()
}

pub fn parse_iso_time(s: &str) -> Result<Timestamp> {
    if s == "now" {
        return Ok(now());
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| timestamp_from_datetime(&dt))
        .map_err(|e| Error::from(("timestamp parsing failed", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_time() -> Result<()> {
        #[rustfmt::skip]
        let tests = [
            ("2021-05-03T00:00:00Z",      1620000000),
            ("2021-05-03T01:00:00+01:00", 1620000000),
            ("2021-01-01T00:00:00.500Z",  1609459200),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, parse_iso_time(input)?, "while parsing {}", input);
        }
        Ok(())
    }

    #[test]
    fn test_parse_iso_time_rejects_garbage() {
        assert!(parse_iso_time("yesterday").is_err());
    }
}
