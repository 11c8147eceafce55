use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;

use std::fmt;

/// Envelope the single-resource endpoints wrap their payload in.
#[derive(Debug, Deserialize)]
pub(crate) struct Data<T> {
    pub data: T,
}

/// Timestamp format used by the API, e.g. `2018-10-31 01:23:10` (UTC).
const API_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn api_datetime<'de, D>(de: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    let naive = NaiveDateTime::parse_from_str(&raw, API_TIME_FORMAT).map_err(de::Error::custom)?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// The API serves some counters either as numbers or as numeric strings
/// (`"per_page": "24"`).
pub(crate) fn lenient_u64<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientU64Visitor;

    impl<'de> Visitor<'de> for LenientU64Visitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an unsigned integer or a numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| de::Error::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse()
                .map_err(|_| de::Error::invalid_value(Unexpected::Str(v), &self))
        }
    }

    de.deserialize_any(LenientU64Visitor)
}

/// Boolean flags the API serves as `0`/`1`.
pub(crate) fn bool_from_int<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntBoolVisitor;

    impl<'de> Visitor<'de> for IntBoolVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a bool or a 0/1 integer")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }
    }

    de.deserialize_any(IntBoolVisitor)
}
