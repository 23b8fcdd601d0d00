//! Expiration date handling
//!
//! Secrets carry an optional expiration date entered as `dd-mm-yyyy`. A
//! missing date is stored as the literal string "No set date" to stay
//! compatible with vault files written by earlier versions of the tool.

use std::fmt;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{VaultError, VaultResult};

/// Wire representation of a secret without an expiration date
pub const NO_SET_DATE: &str = "No set date";

/// Display and wire format for expiration dates
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Optional expiration date of a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndDate {
    /// No expiration date set
    #[default]
    NoSetDate,
    /// Expires at the end of the given calendar date
    Date(NaiveDate),
}

impl EndDate {
    /// Parse user input in `dd-mm-yyyy` form
    ///
    /// Empty input (and the "No set date" wire string) parses as
    /// [`EndDate::NoSetDate`]. Anything else must match the exact
    /// two-two-four digit shape and name a real calendar date.
    pub fn parse(input: &str) -> VaultResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == NO_SET_DATE {
            return Ok(Self::NoSetDate);
        }

        let parts: Vec<&str> = trimmed.split('-').collect();
        let shape_ok = parts.len() == 3
            && parts[0].len() == 2
            && parts[1].len() == 2
            && parts[2].len() == 4
            && parts
                .iter()
                .all(|part| part.bytes().all(|b| b.is_ascii_digit()));

        if !shape_ok {
            return Err(invalid_date(trimmed));
        }

        let (day, month, year) = match (
            parts[0].parse::<u32>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<i32>(),
        ) {
            (Ok(d), Ok(m), Ok(y)) => (d, m, y),
            _ => return Err(invalid_date(trimmed)),
        };

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::Date)
            .ok_or_else(|| invalid_date(trimmed))
    }

    /// Check whether an expiration date is set
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Check whether the date has passed relative to `today`
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self, Self::Date(date) if *date < today)
    }
}

fn invalid_date(input: &str) -> VaultError {
    VaultError::Validation(format!(
        "Invalid date: '{}'. Use dd-mm-yyyy (example: 31-12-2025)",
        input
    ))
}

impl fmt::Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSetDate => write!(f, "{}", NO_SET_DATE),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl Serialize for EndDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EndDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EndDate::parse(&raw).map_err(de::Error::custom)
    }
}
