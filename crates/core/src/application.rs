//! # Availabilities Application
//!
//! Reads the current availability from storage, asks the [`Editor`] what has
//! to change, and writes the changes back.
//!
//! Deletes are always applied before upserts. This is part of the contract
//! with storage implementations: an id being deleted is never reused by an
//! upsert in the same batch before the delete has happened.
//!
//! The read and the writes are not atomic. Callers must serialise operations
//! against the same availability. If a write fails midway, the error is
//! returned and the writes that already succeeded stay in place.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{
    editor::Editor,
    errors::{AvailabilityError, AvailabilityResult},
    models::{instructions::Instructions, time_slot::TimeSlot},
    storage::AvailabilityStorage,
};

pub struct AvailabilitiesApplication {
    storage: Arc<dyn AvailabilityStorage>,
    editor: Arc<dyn Editor>,
}

impl AvailabilitiesApplication {
    pub fn new(storage: Arc<dyn AvailabilityStorage>, editor: Arc<dyn Editor>) -> Self {
        Self { storage, editor }
    }

    /// Removes `slot` from the availability
    ///
    /// # Returns
    ///
    /// * `AvailabilityResult<TimeSlot>` - The slot that was actually reserved,
    ///   after rounding to the quarter-hour grid
    ///
    /// # Errors
    ///
    /// * `AvailabilityError::NotFound` - There is no availability at all
    /// * `AvailabilityError::OutOfRange` - The slot is outside the configured bounds
    /// * `AvailabilityError::Conflict` - No single block covers the slot
    /// * `AvailabilityError::Storage` - Reading or writing storage failed
    pub async fn reserve_availability(&self, slot: &TimeSlot) -> AvailabilityResult<TimeSlot> {
        let availabilities = self.storage.list().await?;
        debug!(
            start = %slot.start(),
            end = %slot.end(),
            blocks = availabilities.len(),
            "reserving availability"
        );

        let instructions = self.editor.reserve(slot, &availabilities)?;
        self.apply(&instructions).await?;

        info!(
            start = %instructions.actual_slot.start(),
            end = %instructions.actual_slot.end(),
            "availability reserved"
        );
        Ok(instructions.actual_slot)
    }

    /// Returns `slot` to the availability
    ///
    /// Releasing time that is already available changes nothing.
    ///
    /// # Errors
    ///
    /// * `AvailabilityError::NotFound` - There is no availability at all
    /// * `AvailabilityError::OutOfRange` - The slot is outside the configured bounds
    /// * `AvailabilityError::Storage` - Reading or writing storage failed
    pub async fn release_availability(&self, slot: &TimeSlot) -> AvailabilityResult<()> {
        let availabilities = self.storage.list().await?;
        debug!(
            start = %slot.start(),
            end = %slot.end(),
            blocks = availabilities.len(),
            "releasing availability"
        );

        let instructions = self.editor.release(slot, &availabilities)?;
        self.apply(&instructions).await?;

        info!(start = %slot.start(), end = %slot.end(), "availability released");
        Ok(())
    }

    async fn apply(&self, instructions: &Instructions) -> AvailabilityResult<()> {
        let mut applied = 0usize;

        for availability in &instructions.delete_availabilities {
            let id = availability.id.ok_or_else(|| {
                AvailabilityError::InvalidArgument(
                    "cannot delete an availability that has not been stored".to_string(),
                )
            })?;

            if let Err(e) = self.storage.delete(id).await {
                error!(%id, applied, "failed to delete availability: {:#}", e);
                return Err(AvailabilityError::Storage(e));
            }
            applied += 1;
        }

        for availability in &instructions.upsert_availabilities {
            if let Err(e) = self.storage.upsert(availability.clone()).await {
                error!(id = ?availability.id, applied, "failed to upsert availability: {:#}", e);
                return Err(AvailabilityError::Storage(e));
            }
            applied += 1;
        }

        debug!(
            deleted = instructions.delete_availabilities.len(),
            upserted = instructions.upsert_availabilities.len(),
            "instructions applied"
        );
        Ok(())
    }
}
