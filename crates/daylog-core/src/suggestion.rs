//! Activity suggestion aggregation.
//!
//! Derives the distinct set of historical activity names from the store,
//! formats the suggestion prompt, and mediates the provider call. Suggestion
//! failures are never fatal: the caller always gets a displayable string.

use crate::activity::ActivityStore;
use crate::error::Result;
use crate::provider::{GenerationConfig, SuggestionProvider};
use std::collections::BTreeSet;

/// Fallback shown when the provider cannot produce suggestions.
pub const SUGGESTIONS_FALLBACK: &str = "Unable to generate suggestions at this time.";

/// Collects the distinct, lower-cased activity names across the whole store.
///
/// Empty names are excluded. The set is ordered only for determinism of the
/// prompt; no semantic ordering is implied.
pub fn distinct_activity_names(store: &ActivityStore) -> BTreeSet<String> {
    store
        .records()
        .map(|record| record.activity_name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Formats the fixed suggestion prompt embedding the comma-joined names.
pub fn build_suggestion_prompt(names: &BTreeSet<String>) -> String {
    let joined = names.iter().cloned().collect::<Vec<_>>().join(", ");
    format!(
        "Based on the following activities I've done: {joined}. \
         Suggest some new and different activities I can try today."
    )
}

/// Requests activity suggestions from the provider.
///
/// On any provider failure the fixed fallback string is returned; failures
/// in this path must not disturb the rest of the system.
pub async fn request_suggestions(
    store: &ActivityStore,
    provider: &dyn SuggestionProvider,
) -> String {
    match try_request_suggestions(store, provider).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            tracing::warn!(error = %err, "suggestion provider call failed");
            SUGGESTIONS_FALLBACK.to_string()
        }
    }
}

async fn try_request_suggestions(
    store: &ActivityStore,
    provider: &dyn SuggestionProvider,
) -> Result<String> {
    let names = distinct_activity_names(store);
    let prompt = build_suggestion_prompt(&names);
    let config = GenerationConfig::suggestions();
    let text = provider
        .complete(&prompt, config.max_tokens, config.temperature)
        .await?;
    Ok(text.trim().to_string())
}
