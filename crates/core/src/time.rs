//! Quarter-hour rounding used to normalise reservations.

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::errors::{AvailabilityError, AvailabilityResult};

/// Length of the booking grid, in minutes.
pub const QUARTER_HOUR_MINUTES: i64 = 15;

pub fn quarter_hour() -> Duration {
    Duration::minutes(QUARTER_HOUR_MINUTES)
}

/// Rounds `instant` up to the next quarter-hour boundary.
///
/// Instants that already sit on a boundary (minutes 0, 15, 30 or 45 with no
/// seconds or sub-seconds) are returned unchanged.
///
/// # Errors
///
/// * `AvailabilityError::OutOfRange` - the rounded instant is not representable
pub fn to_next_or_current_quarter_hour(instant: DateTime<Utc>) -> AvailabilityResult<DateTime<Utc>> {
    let floor = instant.duration_trunc(quarter_hour()).map_err(|e| {
        AvailabilityError::OutOfRange(format!("cannot round {instant} to a quarter hour: {e}"))
    })?;

    if floor == instant {
        return Ok(instant);
    }

    floor.checked_add_signed(quarter_hour()).ok_or_else(|| {
        AvailabilityError::OutOfRange(format!("cannot round {instant} to a quarter hour"))
    })
}
