//! Dataset build timestamps.

use std::fmt;

use chrono::{DateTime, Local};

use crate::error::DecodeError;

/// Build time of a dataset, in milliseconds since the Unix epoch.
///
/// Data files write it as a plain decimal number; fractional values parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(f64);

impl Timestamp {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let millis = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| DecodeError::number("timestamp", raw))?;
        if !millis.is_finite() {
            return Err(DecodeError::number("timestamp", raw));
        }
        Ok(Self(millis))
    }

    pub const fn as_millis(&self) -> f64 {
        self.0
    }

    /// True if `self` is strictly newer than `baseline`.
    pub fn supersedes(&self, baseline: Timestamp) -> bool {
        self.0 > baseline.0
    }

    fn to_local(self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp_millis(self.0 as i64).map(|utc| utc.with_timezone(&Local))
    }
}

/// Renders as `built on Jan 02, 2024 at 13:45:10 local time`.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            Some(local) => write!(
                f,
                "built on {} at {} local time",
                local.format("%b %d, %Y"),
                local.format("%H:%M:%S")
            ),
            None => write!(f, "built at {}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_and_fractional_millis() {
        assert_eq!(
            Timestamp::parse("1700000000000").unwrap().as_millis(),
            1_700_000_000_000.0
        );
        assert_eq!(Timestamp::parse("12.5").unwrap().as_millis(), 12.5);
        assert!(Timestamp::parse("soon").is_err());
        assert!(Timestamp::parse("NaN").is_err());
    }

    #[test]
    fn supersedes_is_strict() {
        let base = Timestamp::from_millis(100.0);
        assert!(Timestamp::from_millis(101.0).supersedes(base));
        assert!(!Timestamp::from_millis(100.0).supersedes(base));
        assert!(!Timestamp::from_millis(99.0).supersedes(base));
    }

    #[test]
    fn display_mentions_build_date() {
        let text = Timestamp::from_millis(1_700_000_000_000.0).to_string();
        assert!(text.starts_with("built on Nov 1"), "{text}");
        assert!(text.ends_with("local time"));
    }
}
