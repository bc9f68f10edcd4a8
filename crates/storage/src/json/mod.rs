use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use lingua_core::model::ProfileId;

use crate::repository::{
    DailyPlanRepository, GoalsRepository, ProfileRepository, RadarRepository, ResourceRepository,
    SettingsRepository, Storage, StorageError, TrackerRepository,
};

mod daily_plan_repo;
mod documents;
mod goals_repo;
mod profile_repo;
mod radar_repo;
mod resource_repo;
mod settings_repo;
mod tracker_repo;

pub(crate) const REGISTRY_FILE: &str = "profiles.json";
pub(crate) const SETTINGS_FILE: &str = "settings.json";
pub(crate) const PROFILES_DIR: &str = "profiles";

pub(crate) const TRACKER_FILE: &str = "tracker.json";
pub(crate) const GOALS_FILE: &str = "goals.json";
pub(crate) const RESOURCES_FILE: &str = "resources.json";
pub(crate) const RADAR_FILE: &str = "radar.json";
pub(crate) const DAILY_PLAN_FILE: &str = "dailyplan.json";

/// JSON document adapter: one file per store per profile under a single
/// data root, plus two global documents.
///
/// Reads are forgiving: a missing document materializes as the default and
/// is written back (lazy creation), and an unreadable or corrupt document
/// is substituted with the default after a one-time warning. Writes go
/// through a sibling temp file and an atomic rename, and their errors
/// propagate so the caller knows an edit was not persisted.
pub struct JsonStorage {
    root: PathBuf,
    warned: Mutex<HashSet<PathBuf>>,
}

impl JsonStorage {
    /// Open (and create, if needed) a data root.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the root directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| io_error(&root, &err))?;
        fs::create_dir_all(root.join(PROFILES_DIR))
            .map_err(|err| io_error(&root.join(PROFILES_DIR), &err))?;
        Ok(Self {
            root,
            warned: Mutex::new(HashSet::new()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn global_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    pub(crate) fn profiles_dir(&self) -> PathBuf {
        self.root.join(PROFILES_DIR)
    }

    pub(crate) fn profile_dir(&self, profile: &ProfileId) -> PathBuf {
        self.profiles_dir().join(profile.as_str())
    }

    pub(crate) fn profile_path(&self, profile: &ProfileId, file: &str) -> PathBuf {
        self.profile_dir(profile).join(file)
    }

    /// Read a document, substituting (and persisting) the default when the
    /// file is missing, and substituting the default with a one-time
    /// warning when the file cannot be read or parsed.
    pub(crate) fn read_or_default<D>(&self, path: &Path) -> D
    where
        D: Default + Serialize + DeserializeOwned,
    {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(doc) => doc,
                Err(err) => {
                    self.warn_once(path, &format!("unreadable document, using defaults: {err}"));
                    D::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let doc = D::default();
                // Lazy creation; a failure here is only a missed warm-up,
                // the next successful edit writes the document anyway.
                if let Err(err) = self.write_document(path, &doc) {
                    self.warn_once(path, &format!("could not seed default document: {err}"));
                }
                doc
            }
            Err(err) => {
                self.warn_once(path, &format!("unreadable document, using defaults: {err}"));
                D::default()
            }
        }
    }

    /// Read a document that has no meaningful default, yielding `None`
    /// when it is missing or unreadable.
    pub(crate) fn read_optional<D: DeserializeOwned>(&self, path: &Path) -> Option<D> {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    self.warn_once(path, &format!("unreadable document, ignoring: {err}"));
                    None
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                self.warn_once(path, &format!("unreadable document, ignoring: {err}"));
                None
            }
        }
    }

    /// Serialize and write a document via temp file + rename.
    pub(crate) fn write_document<D: Serialize>(
        &self,
        path: &Path,
        doc: &D,
    ) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error(parent, &err))?;
        }
        let json = serde_json::to_string_pretty(doc)
            .map_err(|err| StorageError::Serialization(format!("{}: {err}", path.display())))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|err| io_error(&tmp, &err))?;
        fs::rename(&tmp, path).map_err(|err| io_error(path, &err))?;
        Ok(())
    }

    pub(crate) fn warn_once(&self, path: &Path, message: &str) {
        let mut warned = self.warned.lock().expect("warned set poisoned");
        if warned.insert(path.to_path_buf()) {
            warn!(path = %path.display(), "{message}");
        }
    }
}

pub(crate) fn io_error(path: &Path, err: &io::Error) -> StorageError {
    StorageError::Io(format!("{}: {err}", path.display()))
}

impl Storage {
    /// Build a `Storage` backed by JSON documents under `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data root cannot be created.
    pub fn json(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let repo = Arc::new(JsonStorage::open(root)?);
        let profiles: Arc<dyn ProfileRepository> = repo.clone();
        let tracker: Arc<dyn TrackerRepository> = repo.clone();
        let goals: Arc<dyn GoalsRepository> = repo.clone();
        let resources: Arc<dyn ResourceRepository> = repo.clone();
        let radar: Arc<dyn RadarRepository> = repo.clone();
        let daily_plan: Arc<dyn DailyPlanRepository> = repo.clone();
        let settings: Arc<dyn SettingsRepository> = repo;
        Ok(Self {
            profiles,
            tracker,
            goals,
            resources,
            radar,
            daily_plan,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonStorage>();
    }
}
