//! Activity domain module.
//!
//! - `model`: the `ActivityRecord` entity
//! - `store`: the date-keyed in-memory `ActivityStore`
//! - `mood`: heuristic mood inference and the `Predict` sentinel
//! - `repository`: persistence trait for the store

mod model;
mod mood;
mod repository;
mod store;

pub use model::ActivityRecord;
pub use mood::{MOOD_OPTIONS, MOOD_PREDICT, MoodChoice, infer_mood};
pub use repository::ActivityRepository;
pub use store::ActivityStore;
