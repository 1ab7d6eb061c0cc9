//! # Availability Configuration
//!
//! Bounds and booking rules shared by the editor and its callers. Values are
//! read from environment variables, falling back to defaults:
//!
//! - `AVAILABILITY_MINIMUM`: earliest instant any slot may touch, RFC 3339
//!   (default: "2000-01-01T00:00:00Z")
//! - `AVAILABILITY_MAXIMUM`: latest instant any slot may touch, RFC 3339
//!   (default: "2100-01-01T00:00:00Z")
//! - `BOOKING_MINIMUM_LENGTH_MINUTES`: shortest slot callers may book
//!   (default: 15)

use chrono::{DateTime, Duration, TimeZone, Utc};
use eyre::{Result, WrapErr, eyre};
use std::env;

use crate::models::time_slot::TimeSlot;

pub const DEFAULT_MINIMUM_BOOKING_LENGTH_MINUTES: i64 = 15;

/// Global bounds every slot must fall within, plus the booking rules callers
/// use when constructing slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityConfig {
    /// No slot may start before this instant
    pub minimum_availability: DateTime<Utc>,

    /// No slot may end after this instant
    pub maximum_availability: DateTime<Utc>,

    /// Shortest slot a caller may book
    pub minimum_booking_length: Duration,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            minimum_availability: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            maximum_availability: Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap(),
            minimum_booking_length: Duration::minutes(DEFAULT_MINIMUM_BOOKING_LENGTH_MINUTES),
        }
    }
}

impl AvailabilityConfig {
    /// Creates a configuration, checking that the bounds form a non-empty range
    /// and that the booking length is positive
    pub fn new(
        minimum_availability: DateTime<Utc>,
        maximum_availability: DateTime<Utc>,
        minimum_booking_length: Duration,
    ) -> Result<Self> {
        if minimum_availability >= maximum_availability {
            return Err(eyre!(
                "minimum availability {} must be before maximum availability {}",
                minimum_availability,
                maximum_availability
            ));
        }

        if minimum_booking_length <= Duration::zero() {
            return Err(eyre!("minimum booking length must be positive"));
        }

        Ok(Self {
            minimum_availability,
            maximum_availability,
            minimum_booking_length,
        })
    }

    /// Loads the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - a bound is not a valid RFC 3339 instant
    /// - the booking length is not an integer
    /// - the resulting values fail the checks in [`AvailabilityConfig::new`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let minimum_availability = match lookup("AVAILABILITY_MINIMUM") {
            Some(value) => parse_instant(&value).wrap_err("Invalid AVAILABILITY_MINIMUM value")?,
            None => defaults.minimum_availability,
        };

        let maximum_availability = match lookup("AVAILABILITY_MAXIMUM") {
            Some(value) => parse_instant(&value).wrap_err("Invalid AVAILABILITY_MAXIMUM value")?,
            None => defaults.maximum_availability,
        };

        let minimum_booking_length = match lookup("BOOKING_MINIMUM_LENGTH_MINUTES") {
            Some(value) => {
                let minutes: i64 = value
                    .trim()
                    .parse()
                    .wrap_err("Invalid BOOKING_MINIMUM_LENGTH_MINUTES value")?;
                Duration::try_minutes(minutes).ok_or_else(|| {
                    eyre!("BOOKING_MINIMUM_LENGTH_MINUTES value {} is out of range", minutes)
                })?
            }
            None => defaults.minimum_booking_length,
        };

        Self::new(minimum_availability, maximum_availability, minimum_booking_length)
    }

    /// Returns true if `slot` is at least the minimum booking length
    pub fn is_bookable(&self, slot: &TimeSlot) -> bool {
        slot.duration() >= self.minimum_booking_length
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value.trim())?.with_timezone(&Utc))
}
