//! In-memory activity store.
//!
//! The store is the single process-wide source of truth for activities: a
//! date-keyed mapping to ordered record sequences, mutated only by the `log`
//! and `schedule` operations and persisted through an [`ActivityRepository`]
//! implementation.
//!
//! [`ActivityRepository`]: super::repository::ActivityRepository

use super::model::ActivityRecord;
use super::mood::{MoodChoice, infer_mood};
use crate::error::{DaylogError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapping from `YYYY-MM-DD` date keys to ordered activity sequences.
///
/// Insertion order within a date is log order. A date absent from the map is
/// equivalent to an empty sequence. Every record's own `date` field equals
/// its containing key; records are only created inside store mutations, so
/// the invariant holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityStore {
    entries: BTreeMap<String, Vec<ActivityRecord>>,
}

impl ActivityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a persisted mapping.
    ///
    /// Keys that fail date validation or disagree with their records' `date`
    /// fields are dropped with a warning rather than poisoning the store.
    pub fn from_map(entries: BTreeMap<String, Vec<ActivityRecord>>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(date, records)| {
                let valid = parse_date(date).is_ok() && records.iter().all(|r| r.date == *date);
                if !valid {
                    tracing::warn!(date, "dropping invalid date key from persisted activities");
                }
                valid
            })
            .collect();
        Self { entries }
    }

    /// Consumes the store, returning the underlying mapping.
    pub fn into_map(self) -> BTreeMap<String, Vec<ActivityRecord>> {
        self.entries
    }

    /// Logs an executed activity from raw form input.
    ///
    /// All inputs are validated: `name`, `time_spent`, `date`, and `time`
    /// must be non-empty, `time_spent` must parse to a positive integer, and
    /// `date` must be a valid `YYYY-MM-DD` date. With `MoodChoice::Predict`
    /// the mood is inferred from the activity name; otherwise the chosen
    /// mood is stored verbatim.
    ///
    /// Returns a clone of the stored record. On any validation failure the
    /// store is left untouched.
    pub fn log(
        &mut self,
        name: &str,
        time_spent: &str,
        date: &str,
        time: &str,
        mood_choice: MoodChoice,
    ) -> Result<ActivityRecord> {
        let name = require_field(name, "activity name")?;
        let time_spent = require_field(time_spent, "time spent")?;
        let date = require_field(date, "date")?;
        let time = require_field(time, "time")?;

        let minutes: u32 = time_spent
            .parse()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                DaylogError::validation("time spent", "must be a positive number of minutes")
            })?;

        let date_key = parse_date(date)?.format(DATE_FORMAT).to_string();

        let mood = match mood_choice {
            MoodChoice::Predict => infer_mood(name).to_string(),
            MoodChoice::Chosen(mood) => mood,
        };

        let record = ActivityRecord {
            activity_name: name.to_string(),
            time_spent: Some(minutes),
            date: date_key.clone(),
            time: time.to_string(),
            mood: Some(mood),
        };

        self.entries.entry(date_key).or_default().push(record.clone());
        tracing::debug!(date = %record.date, activity = %record.activity_name, "logged activity");
        Ok(record)
    }

    /// Schedules an activity across a comma-separated list of dates.
    ///
    /// Every date is validated before any record is inserted, so the batch
    /// is all-or-nothing: one bad date leaves the store untouched. Scheduled
    /// records carry neither a duration nor a mood.
    pub fn schedule(
        &mut self,
        name: &str,
        comma_separated_dates: &str,
        time: &str,
    ) -> Result<Vec<ActivityRecord>> {
        let name = require_field(name, "activity name")?;
        let dates = require_field(comma_separated_dates, "dates")?;
        let time = require_field(time, "time")?;

        // Validate the whole batch up front.
        let mut date_keys = Vec::new();
        for raw in dates.split(',') {
            let parsed = parse_date(raw.trim())?;
            date_keys.push(parsed.format(DATE_FORMAT).to_string());
        }

        let mut created = Vec::with_capacity(date_keys.len());
        for date_key in date_keys {
            let record = ActivityRecord {
                activity_name: name.to_string(),
                time_spent: None,
                date: date_key.clone(),
                time: time.to_string(),
                mood: None,
            };
            self.entries.entry(date_key).or_default().push(record.clone());
            created.push(record);
        }
        tracing::debug!(activity = %name, count = created.len(), "scheduled activity");
        Ok(created)
    }

    /// Returns the activities for a date in log order, empty if none.
    pub fn activities_for(&self, date: &str) -> &[ActivityRecord] {
        self.entries.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over all date keys in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over every record across every date.
    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.entries.values().flatten()
    }

    /// Total number of records across all dates.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn require_field<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DaylogError::validation(field, "must not be empty"));
    }
    Ok(trimmed)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| DaylogError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_run() -> ActivityStore {
        let mut store = ActivityStore::new();
        store
            .log("Morning Run", "30", "2024-01-05", "07:00", MoodChoice::Predict)
            .unwrap();
        store
    }

    #[test]
    fn test_log_with_predicted_mood() {
        let store = store_with_run();
        let records = store.activities_for("2024-01-05");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].activity_name, "Morning Run");
        assert_eq!(records[0].time_spent, Some(30));
        assert_eq!(records[0].mood, Some("Energetic".to_string()));
        assert_eq!(records[0].date, "2024-01-05");
    }

    #[test]
    fn test_log_with_chosen_mood() {
        let mut store = ActivityStore::new();
        let record = store
            .log(
                "Read a book",
                "20",
                "2024-01-05",
                "21:00",
                MoodChoice::Chosen("Happy".to_string()),
            )
            .unwrap();
        assert_eq!(record.mood, Some("Happy".to_string()));
    }

    #[test]
    fn test_log_rejects_non_numeric_minutes() {
        let mut store = ActivityStore::new();
        let err = store
            .log("Gym", "abc", "2024-01-05", "08:00", MoodChoice::Predict)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn test_log_rejects_zero_minutes() {
        let mut store = ActivityStore::new();
        let err = store
            .log("Gym", "0", "2024-01-05", "08:00", MoodChoice::Predict)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_log_rejects_invalid_date() {
        let mut store = ActivityStore::new();
        let err = store
            .log("Gym", "30", "2024-13-01", "08:00", MoodChoice::Predict)
            .unwrap_err();
        assert!(matches!(err, DaylogError::InvalidDate(d) if d == "2024-13-01"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_log_rejects_empty_name() {
        let mut store = ActivityStore::new();
        let err = store
            .log("   ", "30", "2024-01-05", "08:00", MoodChoice::Predict)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_log_preserves_insertion_order() {
        let mut store = ActivityStore::new();
        store
            .log("First", "10", "2024-01-05", "08:00", MoodChoice::Predict)
            .unwrap();
        store
            .log("Second", "10", "2024-01-05", "09:00", MoodChoice::Predict)
            .unwrap();
        let names: Vec<_> = store
            .activities_for("2024-01-05")
            .iter()
            .map(|r| r.activity_name.as_str())
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn test_schedule_inserts_unexecuted_records() {
        let mut store = ActivityStore::new();
        let created = store
            .schedule("Gym", "2024-01-05, 2024-01-06", "08:00")
            .unwrap();
        assert_eq!(created.len(), 2);
        for record in &created {
            assert_eq!(record.time_spent, None);
            assert_eq!(record.mood, None);
            assert!(record.is_scheduled());
        }
        assert_eq!(store.activities_for("2024-01-05").len(), 1);
        assert_eq!(store.activities_for("2024-01-06").len(), 1);
    }

    #[test]
    fn test_schedule_is_all_or_nothing() {
        let mut store = ActivityStore::new();
        let err = store
            .schedule("Gym", "2024-01-05, not-a-date, 2024-01-07", "08:00")
            .unwrap_err();
        assert!(matches!(err, DaylogError::InvalidDate(d) if d == "not-a-date"));
        // One invalid date among three applies none of the three.
        assert!(store.is_empty());
    }

    #[test]
    fn test_activities_for_unknown_date_is_empty() {
        let store = store_with_run();
        assert!(store.activities_for("1999-12-31").is_empty());
    }

    #[test]
    fn test_record_date_matches_key() {
        let mut store = ActivityStore::new();
        store
            .log("Walk", "15", "2024-03-09", "12:00", MoodChoice::Predict)
            .unwrap();
        store.schedule("Swim", "2024-03-10", "18:00").unwrap();
        for date in store.dates().collect::<Vec<_>>() {
            for record in store.activities_for(date) {
                assert_eq!(record.date, date);
            }
        }
    }

    #[test]
    fn test_from_map_drops_mismatched_keys() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "2024-01-05".to_string(),
            vec![ActivityRecord {
                activity_name: "Gym".to_string(),
                time_spent: Some(30),
                date: "2024-01-06".to_string(), // disagrees with the key
                time: "08:00".to_string(),
                mood: Some("Neutral".to_string()),
            }],
        );
        let store = ActivityStore::from_map(entries);
        assert!(store.is_empty());
    }

    #[test]
    fn test_map_round_trip() {
        let store = store_with_run();
        let rebuilt = ActivityStore::from_map(store.clone().into_map());
        assert_eq!(rebuilt, store);
    }
}
