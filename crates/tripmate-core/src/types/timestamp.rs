use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC instant, serialized as RFC 3339.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Hour and minute, shown next to history entries.
    pub fn display_time(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_time() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 7, 1, 9, 5, 42).unwrap());
        assert_eq!(ts.display_time(), "09:05");
        assert_eq!(ts.to_string(), "2024-07-01T09:05:42+00:00");
    }

    #[test]
    fn test_serializes_as_string() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 7, 1, 9, 5, 42).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-07-01T09:05:42Z\"");
    }
}
