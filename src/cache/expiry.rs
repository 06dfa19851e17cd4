//! Expiration Input Module
//!
//! Closed sum types for the two ways an entry's expiration can be set, plus
//! the conversions that accept or reject loosely-typed JSON inputs.

use std::time::SystemTime;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde_json::Value;

use crate::error::{CacheItemError, Result};

const EXPIRES_AT_EXPECTED: &str = "null or an RFC 3339 timestamp";
const EXPIRES_AFTER_EXPECTED: &str =
    "null, an integer number of seconds or a {\"secs\", \"nanos\"} duration";
const DURATION_SHAPE_MISMATCH: &str = "object without secs/nanos";

// == Expires At ==
/// Absolute expiration input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiresAt {
    /// No instant supplied: the entry expires at the moment this is applied.
    Now,
    /// A concrete instant, normalized to UTC.
    At(DateTime<Utc>),
}

impl ExpiresAt {
    /// Resolves this input against the current instant.
    pub fn resolve(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ExpiresAt::Now => now,
            ExpiresAt::At(instant) => instant,
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ExpiresAt {
    fn from(instant: DateTime<Tz>) -> Self {
        ExpiresAt::At(instant.with_timezone(&Utc))
    }
}

impl<Tz: TimeZone> From<Option<DateTime<Tz>>> for ExpiresAt {
    fn from(instant: Option<DateTime<Tz>>) -> Self {
        instant.map_or(ExpiresAt::Now, ExpiresAt::from)
    }
}

impl From<SystemTime> for ExpiresAt {
    fn from(instant: SystemTime) -> Self {
        ExpiresAt::At(DateTime::<Utc>::from(instant))
    }
}

impl TryFrom<&Value> for ExpiresAt {
    type Error = CacheItemError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(ExpiresAt::Now),
            Value::String(text) => DateTime::parse_from_rfc3339(text)
                .map(ExpiresAt::from)
                .map_err(|_| CacheItemError::unexpected_kind(EXPIRES_AT_EXPECTED, "string")),
            other => Err(CacheItemError::unexpected_kind(
                EXPIRES_AT_EXPECTED,
                kind_of(other),
            )),
        }
    }
}

impl TryFrom<Value> for ExpiresAt {
    type Error = CacheItemError;

    fn try_from(value: Value) -> Result<Self> {
        ExpiresAt::try_from(&value)
    }
}

// == Expires After ==
/// Relative expiration input, measured from the moment it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiresAfter {
    /// No duration supplied: use the configured default TTL, if any.
    Default,
    /// Whole seconds; negative values denote an already elapsed period.
    Seconds(i64),
    /// A structured duration.
    Duration(TimeDelta),
}

impl ExpiresAfter {
    /// Resolves this input into an absolute expiration.
    ///
    /// Instants beyond the representable range saturate at its bounds.
    pub fn resolve(self, now: DateTime<Utc>, default_ttl: Option<u64>) -> ExpiresAt {
        match self {
            ExpiresAfter::Default => match default_ttl {
                Some(seconds) => ExpiresAfter::Seconds(i64::try_from(seconds).unwrap_or(i64::MAX))
                    .resolve(now, None),
                None => ExpiresAt::Now,
            },
            ExpiresAfter::Seconds(seconds) => {
                let delta = TimeDelta::try_seconds(seconds).unwrap_or(if seconds > 0 {
                    TimeDelta::MAX
                } else {
                    TimeDelta::MIN
                });
                ExpiresAt::At(offset(now, delta))
            }
            ExpiresAfter::Duration(delta) => ExpiresAt::At(offset(now, delta)),
        }
    }
}

impl From<i64> for ExpiresAfter {
    fn from(seconds: i64) -> Self {
        ExpiresAfter::Seconds(seconds)
    }
}

impl From<i32> for ExpiresAfter {
    fn from(seconds: i32) -> Self {
        ExpiresAfter::Seconds(i64::from(seconds))
    }
}

impl From<u32> for ExpiresAfter {
    fn from(seconds: u32) -> Self {
        ExpiresAfter::Seconds(i64::from(seconds))
    }
}

impl From<TimeDelta> for ExpiresAfter {
    fn from(delta: TimeDelta) -> Self {
        ExpiresAfter::Duration(delta)
    }
}

impl From<std::time::Duration> for ExpiresAfter {
    fn from(duration: std::time::Duration) -> Self {
        ExpiresAfter::Duration(TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX))
    }
}

impl<T: Into<ExpiresAfter>> From<Option<T>> for ExpiresAfter {
    fn from(time: Option<T>) -> Self {
        time.map_or(ExpiresAfter::Default, Into::into)
    }
}

impl TryFrom<&Value> for ExpiresAfter {
    type Error = CacheItemError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(ExpiresAfter::Default),
            Value::Number(number) => {
                if let Some(seconds) = number.as_i64() {
                    Ok(ExpiresAfter::Seconds(seconds))
                } else if number.is_u64() {
                    Ok(ExpiresAfter::Seconds(i64::MAX))
                } else {
                    Err(CacheItemError::unexpected_kind(EXPIRES_AFTER_EXPECTED, "float"))
                }
            }
            Value::Object(_) => serde_json::from_value::<std::time::Duration>(value.clone())
                .map(ExpiresAfter::from)
                .map_err(|_| {
                    CacheItemError::unexpected_kind(EXPIRES_AFTER_EXPECTED, DURATION_SHAPE_MISMATCH)
                }),
            other => Err(CacheItemError::unexpected_kind(
                EXPIRES_AFTER_EXPECTED,
                kind_of(other),
            )),
        }
    }
}

impl TryFrom<Value> for ExpiresAfter {
    type Error = CacheItemError;

    fn try_from(value: Value) -> Result<Self> {
        ExpiresAfter::try_from(&value)
    }
}

// == Utility Functions ==
/// Names the kind of a JSON value for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn offset(now: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    now.checked_add_signed(delta).unwrap_or(if delta > TimeDelta::zero() {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}
