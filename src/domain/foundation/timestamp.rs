//! UTC timestamps for aggregates and events.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Time elapsed from `earlier` to `self`; negative if `earlier` is later.
    pub fn since(&self, earlier: &Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn since_is_signed() {
        let start = Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let end = Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 9, 12, 30).unwrap());
        assert_eq!(end.since(&start), Duration::seconds(750));
        assert_eq!(start.since(&end), Duration::seconds(-750));
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.as_datetime().year(), 2024);
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2024-01-15T10:30:00Z\""
        );
    }
}
