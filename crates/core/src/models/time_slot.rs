use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AvailabilityError, AvailabilityResult};

/// An interval of absolute time, `[start, end)`
///
/// A `TimeSlot` always has a positive length. Both constructors reject
/// empty or inverted ranges, and so does deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotRequest")]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated wire form of a [`TimeSlot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a slot spanning `[start, end)`
    ///
    /// # Errors
    ///
    /// * `AvailabilityError::InvalidArgument` - `start` is not before `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AvailabilityResult<Self> {
        if start >= end {
            return Err(AvailabilityError::InvalidArgument(format!(
                "slot start {start} must be before slot end {end}"
            )));
        }

        Ok(Self { start, end })
    }

    /// Creates a slot starting at `start` and lasting `duration`
    pub fn with_duration(start: DateTime<Utc>, duration: Duration) -> AvailabilityResult<Self> {
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            AvailabilityError::InvalidArgument(format!("slot starting at {start} overflows"))
        })?;

        Self::new(start, end)
    }

    pub fn with_minutes(start: DateTime<Utc>, minutes: i64) -> AvailabilityResult<Self> {
        let duration = Duration::try_minutes(minutes).ok_or_else(|| {
            AvailabilityError::InvalidArgument(format!("{minutes} minutes is out of range"))
        })?;

        Self::with_duration(start, duration)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if `other` lies entirely within this slot
    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Returns true if the two slots share any instant
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl TryFrom<TimeSlotRequest> for TimeSlot {
    type Error = AvailabilityError;

    fn try_from(request: TimeSlotRequest) -> Result<Self, Self::Error> {
        Self::new(request.start, request.end)
    }
}

impl From<TimeSlot> for TimeSlotRequest {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start: slot.start,
            end: slot.end,
        }
    }
}
