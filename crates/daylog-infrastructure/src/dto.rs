//! Persistence DTOs for the activity store.
//!
//! The on-disk document carries an explicit schema version so future layout
//! changes can be migrated instead of guessed at.

use daylog_core::activity::{ActivityRecord, ActivityStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted form of the whole activity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitiesDocument {
    /// Schema version of this document.
    pub version: u32,
    /// Date-keyed activity sequences, log order preserved.
    #[serde(default)]
    pub activities: BTreeMap<String, Vec<ActivityRecord>>,
}

impl ActivitiesDocument {
    /// Snapshots a store into a document at the current schema version.
    pub fn from_store(store: &ActivityStore) -> Self {
        Self {
            version: SCHEMA_VERSION,
            activities: store.clone().into_map(),
        }
    }

    /// Rebuilds the domain store from this document.
    pub fn into_store(self) -> ActivityStore {
        ActivityStore::from_map(self.activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daylog_core::activity::MoodChoice;

    #[test]
    fn test_document_round_trip() {
        let mut store = ActivityStore::new();
        store
            .log("Run", "30", "2024-01-05", "07:00", MoodChoice::Predict)
            .unwrap();
        store.schedule("Gym", "2024-02-01", "08:00").unwrap();

        let document = ActivitiesDocument::from_store(&store);
        assert_eq!(document.version, SCHEMA_VERSION);
        assert_eq!(document.into_store(), store);
    }

    #[test]
    fn test_document_toml_shape() {
        let mut store = ActivityStore::new();
        store
            .log("Run", "30", "2024-01-05", "07:00", MoodChoice::Predict)
            .unwrap();

        let text = toml::to_string_pretty(&ActivitiesDocument::from_store(&store)).unwrap();
        assert!(text.contains("version = 1"));
        assert!(text.contains("2024-01-05"));

        let parsed: ActivitiesDocument = toml::from_str(&text).unwrap();
        assert_eq!(parsed.into_store(), store);
    }
}
