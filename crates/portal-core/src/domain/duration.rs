//! Durations travel as whole microseconds in a signed 64-bit integer.
//!
//! Encoding rejects durations that the wire cannot carry exactly, so every
//! encoded value decodes back to the same [`Duration`].

use std::time::Duration;

use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serializer};

pub fn to_micros(value: Duration) -> Result<i64, String> {
    if value.subsec_nanos() % 1_000 != 0 {
        return Err(format!(
            "duration {value:?} is not a whole number of microseconds"
        ));
    }
    i64::try_from(value.as_micros())
        .map_err(|_| format!("duration {value:?} exceeds {} microseconds", i64::MAX))
}

pub fn from_micros(micros: i64) -> Result<Duration, String> {
    u64::try_from(micros)
        .map(Duration::from_micros)
        .map_err(|_| format!("duration must be non-negative: {micros}"))
}

pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let micros = to_micros(*value).map_err(S::Error::custom)?;
    serializer.serialize_i64(micros)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let micros = i64::deserialize(deserializer)?;
    from_micros(micros).map_err(D::Error::custom)
}
