// ABOUTME: Fixed-width UTC timestamp handling for todos
// ABOUTME: One textual form shared by the database column and the JSON field

use chrono::{DateTime, ParseError, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Always six fractional digits and a `Z` suffix, so the text sorts in time order
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Current instant at the precision the store keeps
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
