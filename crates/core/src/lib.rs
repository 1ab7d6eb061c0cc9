//! # Availabilities Core
//!
//! Domain types and logic for managing when a resource is free.
//!
//! Availability is stored as a list of disjoint, non-adjacent blocks of time.
//! Reserving a slot carves it out of the block that contains it; releasing a
//! slot adds it back, merging with neighbouring blocks.
//!
//! ## Layout
//!
//! - **Models**: `TimeSlot`, `Availability` and the `Instructions` diff
//! - **Editor**: pure computation of the diff for a reserve or release
//! - **Application**: reads storage, runs the editor, applies the diff
//! - **Storage**: the persistence contract and an in-memory implementation
//! - **Config**: global bounds and booking rules

pub mod application;
pub mod config;
pub mod editor;
pub mod errors;
pub mod models;
pub mod storage;
pub mod time;
