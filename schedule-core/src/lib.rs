//! Core types for the schedule CLI.
//!
//! - `Event` and `EventUpdate` for scheduled events
//! - `ScheduleStore`, the in-memory event collection persisted to a JSON file
//! - `ScheduleConfig` for locating the data file

pub mod config;
pub mod error;
pub mod event;
pub mod store;

// Re-export the main types at crate root for convenience
pub use config::{CorruptDataPolicy, ScheduleConfig};
pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventUpdate};
pub use store::{LoadWarning, OpenReport, ScheduleStore};
