//! Lecture times on the wire: written as `HH:MM`, read as `HH:MM` or `HH:MM:SS`

use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%H:%M";

pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(value, FORMAT))
}

pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(FORMAT))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|_| de::Error::custom(format!("invalid time '{raw}', expected HH:MM")))
}

/// Same format for optional fields; pair with `#[serde(default)]`
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => super::serialize(time, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                parse(&raw)
                    .map_err(|_| de::Error::custom(format!("invalid time '{raw}', expected HH:MM")))
            })
            .transpose()
    }
}
