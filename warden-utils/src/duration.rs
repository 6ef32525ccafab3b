use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)([smhd])$").expect("duration pattern is a valid regex")
});

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    #[error("duration must look like `10m`, `1h` or `1d`")]
    InvalidFormat,
    #[error("duration does not fit into milliseconds")]
    Overflow,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl DurationUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "s" => Some(Self::Second),
            "m" => Some(Self::Minute),
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            _ => None,
        }
    }

    pub const fn millis(self) -> u64 {
        match self {
            Self::Second => 1_000,
            Self::Minute => 60_000,
            Self::Hour => 3_600_000,
            Self::Day => 86_400_000,
        }
    }
}

/// A validated duration token such as `10m`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DurationSpec {
    pub value: u64,
    pub unit: DurationUnit,
}

impl DurationSpec {
    /// Total length in milliseconds, `None` on overflow.
    pub fn as_millis(self) -> Option<u64> {
        self.value.checked_mul(self.unit.millis())
    }
}

impl FromStr for DurationSpec {
    type Err = DurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let captures = DURATION_PATTERN
            .captures(raw)
            .ok_or(DurationError::InvalidFormat)?;

        let value = captures[1]
            .parse::<u64>()
            .map_err(|_| DurationError::Overflow)?;
        let unit = DurationUnit::from_suffix(&captures[2]).ok_or(DurationError::InvalidFormat)?;

        Ok(Self { value, unit })
    }
}

/// Parse a duration token straight into milliseconds.
pub fn parse_duration_millis(raw: &str) -> Result<u64, DurationError> {
    raw.parse::<DurationSpec>()?
        .as_millis()
        .ok_or(DurationError::Overflow)
}
