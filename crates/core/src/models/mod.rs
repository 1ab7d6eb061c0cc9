pub mod availability;
pub mod instructions;
pub mod time_slot;
