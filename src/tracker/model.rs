use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque tracker identifier (creation time in epoch milliseconds, bumped
/// when needed to stay unique).
pub type TrackerId = i64;

/// One tracked goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: TrackerId,
    pub goal: String,
    /// Start of the current streak.
    #[serde(rename = "startDate", with = "iso_millis")]
    pub start_date: DateTime<Utc>,
}

/// `startDate` is written the way JavaScript's `Date#toISOString` writes it:
/// `2024-05-01T12:30:00.000Z`. Any RFC 3339 timestamp is accepted on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
