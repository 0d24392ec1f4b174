use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Timestamp as the Management API writes it (`2015-05-18T11:29:46.809Z`).
///
/// Serializes with millisecond precision and a `Z` suffix; parses any
/// RFC 3339 string, normalizing the offset to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub DateTime<Utc>);

impl Time {
    /// Create a new Time from a DateTime
    pub fn new(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }

    /// Current time
    pub fn now() -> Self {
        Time(Utc::now())
    }

    /// Parse an RFC 3339 timestamp
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Time(dt.with_timezone(&Utc)))
    }

    /// Format as the API does
    pub fn to_api_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Deref for Time {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(t: Time) -> Self {
        t.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_api_string())
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_api_string())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Time::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_time_serialization() {
        let dt = Utc.with_ymd_and_hms(2015, 5, 18, 11, 29, 46).unwrap()
            + chrono::Duration::milliseconds(809);
        let json = serde_json::to_string(&Time(dt)).unwrap();
        assert_eq!(json, r#""2015-05-18T11:29:46.809Z""#);
    }

    #[test]
    fn test_time_deserialization() {
        let time: Time = serde_json::from_str(r#""2015-05-18T11:29:46.809Z""#).unwrap();
        assert_eq!(time.timestamp(), 1431948586);
        assert_eq!(time.nanosecond(), 809_000_000);
    }

    #[test]
    fn test_time_offset_normalized() {
        let time: Time = serde_json::from_str(r#""2020-01-01T02:00:00+02:00""#).unwrap();
        assert_eq!(time.to_api_string(), "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_time_invalid() {
        let result: Result<Time, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_time_null() {
        let result: Result<Option<Time>, _> = serde_json::from_str("null");
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }
}
