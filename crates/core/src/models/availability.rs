use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AvailabilityResult;
use crate::models::time_slot::TimeSlot;

/// A contiguous span of free time for the resource
///
/// `id` is `None` for blocks that have not been stored yet. Blocks are
/// treated as values: the `with_*` methods return a modified copy that
/// carries the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: Option<Uuid>,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl Availability {
    /// Creates a block that has not been stored yet
    pub fn new(start_utc: DateTime<Utc>, end_utc: DateTime<Utc>) -> Self {
        Self {
            id: None,
            start_utc,
            end_utc,
        }
    }

    pub fn with_start(&self, start_utc: DateTime<Utc>) -> Self {
        Self {
            start_utc,
            ..self.clone()
        }
    }

    pub fn with_end(&self, end_utc: DateTime<Utc>) -> Self {
        Self {
            end_utc,
            ..self.clone()
        }
    }

    /// Returns true if `slot` lies entirely within this block
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.start_utc <= slot.start() && self.end_utc >= slot.end()
    }

    pub fn slot(&self) -> AvailabilityResult<TimeSlot> {
        TimeSlot::new(self.start_utc, self.end_utc)
    }
}

impl From<TimeSlot> for Availability {
    fn from(slot: TimeSlot) -> Self {
        Self::new(slot.start(), slot.end())
    }
}
