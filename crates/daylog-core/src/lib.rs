//! daylog-core - domain layer for the daylog activity tracker.
//!
//! Holds the date-keyed activity store, calendar navigation, heuristic mood
//! inference, suggestion aggregation, and conversation management, together
//! with the provider and repository traits the outer layers implement. No
//! I/O happens in this crate.

pub mod activity;
pub mod calendar;
pub mod conversation;
pub mod error;
pub mod provider;
pub mod suggestion;

// Re-export common error type
pub use error::DaylogError;
