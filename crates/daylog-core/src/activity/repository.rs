//! Activity repository trait.
//!
//! Defines the interface for persisting the activity store, decoupling the
//! domain layer from the concrete storage mechanism (TOML files today,
//! anything else tomorrow).

use super::store::ActivityStore;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for activity store persistence.
///
/// The store is persisted as a whole: one load at process start, one save at
/// shutdown (or any safe checkpoint). Implementations are expected to be
/// fail-soft on load: missing or corrupt persisted state yields an empty
/// store rather than failing the process.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Loads the persisted store, or an empty one if nothing usable exists.
    async fn load(&self) -> Result<ActivityStore>;

    /// Saves the full store, replacing any previously persisted state.
    async fn save(&self, store: &ActivityStore) -> Result<()>;
}
