use serde::{Deserialize, Serialize};

use crate::models::{availability::Availability, time_slot::TimeSlot};

/// The changes needed to bring the stored availability in line with a
/// reservation or release
///
/// Upserts replace the stored block with the same id, or insert a new block
/// when the id is absent. Deletes are removed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructions {
    pub actual_slot: TimeSlot,
    pub upsert_availabilities: Vec<Availability>,
    pub delete_availabilities: Vec<Availability>,
}

impl Instructions {
    pub fn empty(actual_slot: TimeSlot) -> Self {
        Self {
            actual_slot,
            upsert_availabilities: Vec::new(),
            delete_availabilities: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.upsert_availabilities.is_empty() && self.delete_availabilities.is_empty()
    }
}
