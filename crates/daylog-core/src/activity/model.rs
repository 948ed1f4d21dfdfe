//! Activity record domain model.

use serde::{Deserialize, Serialize};

/// One logged or scheduled event.
///
/// A logged activity carries a duration and a mood tag. A scheduled activity
/// is an unexecuted future entry: both `time_spent` and `mood` are `None`
/// until the day arrives and the user logs it for real.
///
/// Records are immutable once created; corrections are made by logging a
/// superseding entry, never by in-place edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Free-text activity name (non-empty).
    pub activity_name: String,
    /// Duration in minutes; `None` for scheduled entries.
    pub time_spent: Option<u32>,
    /// Calendar date in `YYYY-MM-DD` format; always equals the store key.
    pub date: String,
    /// Time of day in `HH:MM` format.
    pub time: String,
    /// Mood tag; `None` for scheduled entries.
    pub mood: Option<String>,
}

impl ActivityRecord {
    /// Whether this is a scheduled (not yet executed) entry.
    pub fn is_scheduled(&self) -> bool {
        self.time_spent.is_none() && self.mood.is_none()
    }
}
