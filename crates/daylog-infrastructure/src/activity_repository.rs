//! TOML-backed activity repository.

use crate::dto::{ActivitiesDocument, SCHEMA_VERSION};
use crate::paths::DaylogPaths;
use async_trait::async_trait;
use daylog_core::activity::{ActivityRepository, ActivityStore};
use daylog_core::error::{DaylogError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Persists the activity store as a single versioned TOML document.
///
/// Saves are atomic: the document is written to a temporary file, fsynced,
/// and renamed over the target under an advisory lock. Loads are fail-soft:
/// a missing, unreadable, or corrupt document yields an empty store with a
/// warning instead of failing the process.
#[derive(Clone)]
pub struct TomlActivityRepository {
    path: PathBuf,
}

impl TomlActivityRepository {
    /// Creates a repository backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a repository at the default platform data location.
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(DaylogPaths::activities_file()?))
    }

    /// The file this repository reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ActivityRepository for TomlActivityRepository {
    async fn load(&self) -> Result<ActivityStore> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Ok(load_store(&path)))
            .await
            .map_err(|err| DaylogError::io(format!("failed to join load task: {err}")))?
    }

    async fn save(&self, store: &ActivityStore) -> Result<()> {
        let path = self.path.clone();
        let document = ActivitiesDocument::from_store(store);
        tokio::task::spawn_blocking(move || save_document(&path, &document))
            .await
            .map_err(|err| DaylogError::io(format!("failed to join save task: {err}")))?
    }
}

fn load_store(path: &Path) -> ActivityStore {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no persisted activities, starting empty");
        return ActivityStore::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read activities file, starting empty");
            return ActivityStore::new();
        }
    };

    let document: ActivitiesDocument = match toml::from_str(&content) {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "corrupt activities file, starting empty");
            return ActivityStore::new();
        }
    };

    if document.version != SCHEMA_VERSION {
        tracing::warn!(
            found = document.version,
            expected = SCHEMA_VERSION,
            "unsupported activities schema version, starting empty"
        );
        return ActivityStore::new();
    }

    document.into_store()
}

fn save_document(path: &Path, document: &ActivitiesDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let _lock = FileLock::acquire(path)?;

    let toml_string = toml::to_string_pretty(document)?;

    // Write to a temporary file in the same directory, then rename over the
    // target so a crash mid-write never leaves a truncated document.
    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(toml_string.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), "saved activities");
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| DaylogError::io("store path has no parent directory"))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| DaylogError::io("store path has no file name"))?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// Advisory lock guard released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|err| DaylogError::io(format!("failed to acquire store lock: {err}")))?;
        }

        Ok(Self { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}
