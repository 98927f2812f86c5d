//! Time-of-day values used to schedule rides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RideError;

pub const SECONDS_PER_MINUTE: u32 = 60;
pub const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;

/// A wall-clock time between 00:00:00 and 23:59:59 inclusive.
///
/// Ordering is chronological within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RideTime {
    seconds: u32,
}

impl RideTime {
    pub const MIDNIGHT: RideTime = RideTime { seconds: 0 };

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, RideError> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return Err(RideError::InvalidTime(format!(
                "{hour:02}:{minute:02}:{second:02}"
            )));
        }
        Ok(Self {
            seconds: hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE + second,
        })
    }

    /// Parses `H:M:S`, each component one or two digits (`"6:6:6"` is 06:06:06).
    pub fn parse(raw: &str) -> Result<Self, RideError> {
        let invalid = || RideError::InvalidTime(raw.to_string());
        let mut parts = raw.trim().split(':');
        let mut next = || -> Result<u32, RideError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };
        let (hour, minute, second) = (next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::from_hms(hour, minute, second).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u32 {
        self.seconds / SECONDS_PER_HOUR
    }

    pub fn minute(&self) -> u32 {
        self.seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE
    }

    pub fn second(&self) -> u32 {
        self.seconds % SECONDS_PER_MINUTE
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        self.seconds
    }

    /// Absolute distance between two times of the same day, in seconds.
    pub fn seconds_between(a: RideTime, b: RideTime) -> u32 {
        a.seconds.abs_diff(b.seconds)
    }
}

impl fmt::Display for RideTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl FromStr for RideTime {
    type Err = RideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RideTime {
    type Error = RideError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RideTime> for String {
    fn from(time: RideTime) -> Self {
        time.to_string()
    }
}
