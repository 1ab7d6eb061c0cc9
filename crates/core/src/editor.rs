//! # Interval Editor
//!
//! Computes how the stored availability blocks must change when a slot is
//! reserved or released. The editor never touches storage; it returns
//! [`Instructions`] that the caller applies.
//!
//! ## Invariants
//!
//! The blocks passed in are expected to be disjoint and never adjacent (no
//! block ends where another starts). Applying the returned instructions keeps
//! both properties. Input that violates them is not detected.
//!
//! ## Reserve
//!
//! The requested slot is rounded up to the quarter-hour grid and carved out of
//! the single block that contains it. Depending on where the slot sits within
//! that block, the block is shrunk from the left, shrunk from the right, split
//! in two, or deleted.
//!
//! When the block is shrunk from the right or split, its retained left part
//! ends at the requested start, not the rounded one. A block that itself
//! starts off the quarter-hour grid (release does not round) can then come
//! out empty or inverted, e.g. block `[09:07, 11:00)` reserved at
//! `[09:05, 10:00)` yields `[09:07, 09:05)`. The `valid_availability_range`
//! check on the PostgreSQL `availabilities` table rejects that upsert, which
//! fails the apply partway through.
//!
//! ## Release
//!
//! The slot is used as given. It extends the neighbouring block it touches,
//! merges two neighbours into one, or becomes a new block.

use tracing::debug;

use crate::{
    config::AvailabilityConfig,
    errors::{AvailabilityError, AvailabilityResult},
    models::{availability::Availability, instructions::Instructions, time_slot::TimeSlot},
    time::to_next_or_current_quarter_hour,
};

/// Computes availability changes for reservations and releases
pub trait Editor: Send + Sync {
    /// Plans the removal of `slot` from `availabilities`
    ///
    /// # Errors
    ///
    /// * `AvailabilityError::NotFound` - `availabilities` is empty
    /// * `AvailabilityError::InvalidArgument` - the slot is empty once rounded
    /// * `AvailabilityError::OutOfRange` - the rounded slot is outside the configured bounds
    /// * `AvailabilityError::Conflict` - no single block contains the rounded slot
    fn reserve(
        &self,
        slot: &TimeSlot,
        availabilities: &[Availability],
    ) -> AvailabilityResult<Instructions>;

    /// Plans the addition of `slot` to `availabilities`
    ///
    /// # Errors
    ///
    /// * `AvailabilityError::NotFound` - `availabilities` is empty
    /// * `AvailabilityError::OutOfRange` - the slot is outside the configured bounds
    fn release(
        &self,
        slot: &TimeSlot,
        availabilities: &[Availability],
    ) -> AvailabilityResult<Instructions>;
}

/// [`Editor`] over a flat list of availability blocks
#[derive(Debug, Clone, Default)]
pub struct IntervalEditor {
    config: AvailabilityConfig,
}

impl IntervalEditor {
    pub fn new(config: AvailabilityConfig) -> Self {
        Self { config }
    }

    fn check_bounds(&self, slot: &TimeSlot) -> AvailabilityResult<()> {
        if slot.start() < self.config.minimum_availability
            || slot.end() > self.config.maximum_availability
        {
            return Err(AvailabilityError::OutOfRange(format!(
                "slot [{}, {}) is outside the availability range [{}, {})",
                slot.start(),
                slot.end(),
                self.config.minimum_availability,
                self.config.maximum_availability
            )));
        }

        Ok(())
    }
}

fn ensure_not_empty(availabilities: &[Availability]) -> AvailabilityResult<()> {
    if availabilities.is_empty() {
        return Err(AvailabilityError::NotFound(
            "there is no availability".to_string(),
        ));
    }

    Ok(())
}

fn round_to_quarter_hours(slot: &TimeSlot) -> AvailabilityResult<TimeSlot> {
    TimeSlot::new(
        to_next_or_current_quarter_hour(slot.start())?,
        to_next_or_current_quarter_hour(slot.end())?,
    )
}

impl Editor for IntervalEditor {
    fn reserve(
        &self,
        slot: &TimeSlot,
        availabilities: &[Availability],
    ) -> AvailabilityResult<Instructions> {
        ensure_not_empty(availabilities)?;

        let actual_slot = round_to_quarter_hours(slot)?;
        self.check_bounds(&actual_slot)?;

        let containing = availabilities
            .iter()
            .find(|availability| availability.contains(&actual_slot))
            .ok_or_else(|| {
                AvailabilityError::Conflict(format!(
                    "the booking cannot be made for [{}, {})",
                    actual_slot.start(),
                    actual_slot.end()
                ))
            })?;

        let mut instructions = Instructions::empty(actual_slot);
        let starts_flush = actual_slot.start() == containing.start_utc;
        let ends_flush = actual_slot.end() == containing.end_utc;

        match (starts_flush, ends_flush) {
            (true, false) => {
                debug!(id = ?containing.id, "reserve shrinks availability from the left");
                instructions
                    .upsert_availabilities
                    .push(containing.with_start(actual_slot.end()));
            }
            // The retracted end is the requested start, not the rounded one.
            (false, true) => {
                debug!(id = ?containing.id, "reserve shrinks availability from the right");
                instructions
                    .upsert_availabilities
                    .push(containing.with_end(slot.start()));
            }
            (false, false) => {
                debug!(id = ?containing.id, "reserve splits availability");
                instructions
                    .upsert_availabilities
                    .push(containing.with_end(slot.start()));
                instructions
                    .upsert_availabilities
                    .push(Availability::new(actual_slot.end(), containing.end_utc));
            }
            (true, true) => {
                debug!(id = ?containing.id, "reserve consumes availability");
                instructions.delete_availabilities.push(containing.clone());
            }
        }

        Ok(instructions)
    }

    fn release(
        &self,
        slot: &TimeSlot,
        availabilities: &[Availability],
    ) -> AvailabilityResult<Instructions> {
        ensure_not_empty(availabilities)?;

        let actual_slot = *slot;
        self.check_bounds(&actual_slot)?;

        let mut instructions = Instructions::empty(actual_slot);

        if availabilities
            .iter()
            .any(|availability| availability.contains(&actual_slot))
        {
            debug!("release is already available");
            return Ok(instructions);
        }

        let left = availabilities.iter().find(|availability| {
            availability.start_utc < slot.start() && availability.end_utc >= slot.start()
        });
        let right = availabilities.iter().find(|availability| {
            availability.end_utc > slot.end() && availability.start_utc <= slot.end()
        });

        // Blocks strictly within the released span are swallowed by it.
        instructions.delete_availabilities.extend(
            availabilities
                .iter()
                .filter(|availability| {
                    availability.start_utc >= slot.start() && availability.end_utc <= slot.end()
                })
                .cloned(),
        );

        match (left, right) {
            (None, None) => {
                debug!("release inserts new availability");
                instructions
                    .upsert_availabilities
                    .push(Availability::new(slot.start(), slot.end()));
            }
            (None, Some(right)) => {
                debug!(id = ?right.id, "release extends availability backwards");
                instructions
                    .upsert_availabilities
                    .push(right.with_start(slot.start()));
            }
            (Some(left), None) => {
                debug!(id = ?left.id, "release extends availability forwards");
                instructions
                    .upsert_availabilities
                    .push(left.with_end(slot.end()));
            }
            (Some(left), Some(right)) => {
                debug!(left = ?left.id, right = ?right.id, "release merges availabilities");
                instructions.delete_availabilities.push(right.clone());
                instructions
                    .upsert_availabilities
                    .push(left.with_end(right.end_utc));
            }
        }

        Ok(instructions)
    }
}
