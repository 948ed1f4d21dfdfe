//! Heuristic mood inference.
//!
//! A deterministic keyword heuristic standing in for a real classifier:
//! every input produces a mood label, and the same input always produces
//! the same label.

/// Sentinel mood choice that requests automatic prediction.
pub const MOOD_PREDICT: &str = "Predict";

/// Mood labels offered by the logging form, including the prediction sentinel.
pub const MOOD_OPTIONS: [&str; 7] = [
    MOOD_PREDICT,
    "Happy",
    "Sad",
    "Energetic",
    "Relaxed",
    "Stressed",
    "Unknown",
];

/// How the mood of a logged activity is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodChoice {
    /// Compute the mood from the activity name via [`infer_mood`].
    Predict,
    /// Store the user's choice verbatim.
    Chosen(String),
}

impl MoodChoice {
    /// Parses a form value, recognizing the `"Predict"` sentinel.
    pub fn parse(value: &str) -> Self {
        if value == MOOD_PREDICT {
            Self::Predict
        } else {
            Self::Chosen(value.to_string())
        }
    }
}

/// Infers a mood label from an activity name.
///
/// Case-insensitive substring match: "run" or "exercise" yields `Energetic`,
/// "meditate" or "yoga" yields `Relaxed`, anything else `Neutral`.
pub fn infer_mood(activity_name: &str) -> &'static str {
    let name = activity_name.to_lowercase();
    if name.contains("run") || name.contains("exercise") {
        "Energetic"
    } else if name.contains("meditate") || name.contains("yoga") {
        "Relaxed"
    } else {
        "Neutral"
    }
}
