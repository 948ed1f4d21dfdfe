//! daylog-infrastructure - persistence layer.
//!
//! Implements the core's `ActivityRepository` against a versioned TOML
//! document on disk, written atomically.

pub mod activity_repository;
pub mod dto;
pub mod paths;

pub use activity_repository::TomlActivityRepository;
pub use paths::DaylogPaths;
