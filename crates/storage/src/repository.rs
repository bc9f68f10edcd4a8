use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use lingua_core::model::{
    DailyPlan, MonthId, MonthlyGoals, Profile, ProfileId, ProfileRegistry, RadarSnapshot,
    Resource, Settings, TrackerLog,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the profile registry.
///
/// Mirrors the domain `ProfileRegistry` so adapters can round-trip it
/// without re-running the registry's repair logic; rebuilding goes through
/// `ProfileRegistry::from_persisted`.
#[derive(Debug, Clone)]
pub struct RegistryRecord {
    pub active: ProfileId,
    pub profiles: Vec<Profile>,
}

impl RegistryRecord {
    #[must_use]
    pub fn from_registry(registry: &ProfileRegistry) -> Self {
        Self {
            active: registry.active().clone(),
            profiles: registry.profiles().to_vec(),
        }
    }
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Registry document plus per-profile directory lifecycle.
pub trait ProfileRepository: Send + Sync {
    /// Fetch the persisted registry, or `None` if none was written yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for failures that default-substitution
    /// cannot hide (none in the current adapters).
    fn load_registry(&self) -> Result<Option<RegistryRecord>, StorageError>;

    /// Persist the registry document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_registry(&self, registry: &ProfileRegistry) -> Result<(), StorageError>;

    /// Create the per-profile data directory (empty document set).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    fn create_profile_data(&self, id: &ProfileId) -> Result<(), StorageError>;

    /// Remove every document belonging to a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if deletion fails.
    fn delete_profile_data(&self, id: &ProfileId) -> Result<(), StorageError>;

    /// Ids that have a data directory on disk, registered or not.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data root cannot be listed.
    fn list_profile_data(&self) -> Result<Vec<ProfileId>, StorageError>;
}

pub trait TrackerRepository: Send + Sync {
    /// Load a profile's practice log; a missing document is the empty log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on unrecoverable adapter failures.
    fn load_tracker(&self, profile: &ProfileId) -> Result<TrackerLog, StorageError>;

    /// Persist a profile's practice log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_tracker(&self, profile: &ProfileId, log: &TrackerLog) -> Result<(), StorageError>;
}

pub trait GoalsRepository: Send + Sync {
    /// Load all goal months for a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on unrecoverable adapter failures.
    fn load_goals(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, MonthlyGoals>, StorageError>;

    /// Persist all goal months for a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_goals(
        &self,
        profile: &ProfileId,
        goals: &BTreeMap<MonthId, MonthlyGoals>,
    ) -> Result<(), StorageError>;
}

pub trait ResourceRepository: Send + Sync {
    /// Load a profile's resource library.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on unrecoverable adapter failures.
    fn load_resources(&self, profile: &ProfileId) -> Result<Vec<Resource>, StorageError>;

    /// Persist a profile's resource library.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_resources(
        &self,
        profile: &ProfileId,
        resources: &[Resource],
    ) -> Result<(), StorageError>;
}

pub trait RadarRepository: Send + Sync {
    /// Load a profile's radar snapshots.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on unrecoverable adapter failures.
    fn load_snapshots(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, RadarSnapshot>, StorageError>;

    /// Persist a profile's radar snapshots.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_snapshots(
        &self,
        profile: &ProfileId,
        snapshots: &BTreeMap<MonthId, RadarSnapshot>,
    ) -> Result<(), StorageError>;
}

pub trait DailyPlanRepository: Send + Sync {
    /// Load a profile's daily plan.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on unrecoverable adapter failures.
    fn load_plan(&self, profile: &ProfileId) -> Result<DailyPlan, StorageError>;

    /// Persist a profile's daily plan.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_plan(&self, profile: &ProfileId, plan: &DailyPlan) -> Result<(), StorageError>;
}

pub trait SettingsRepository: Send + Sync {
    /// Load global settings; a missing document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on unrecoverable adapter failures.
    fn load_settings(&self) -> Result<Settings, StorageError>;

    /// Persist global settings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError>;
}

//
// ─── STORAGE BUNDLE ────────────────────────────────────────────────────────────
//

/// All repositories behind trait objects, handed to the service layer.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
    pub tracker: Arc<dyn TrackerRepository>,
    pub goals: Arc<dyn GoalsRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub radar: Arc<dyn RadarRepository>,
    pub daily_plan: Arc<dyn DailyPlanRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    /// Build a `Storage` where every repository is the same in-memory
    /// adapter. For tests and prototyping.
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = Arc::new(InMemoryStorage::new());
        Self {
            profiles: repo.clone(),
            tracker: repo.clone(),
            goals: repo.clone(),
            resources: repo.clone(),
            radar: repo.clone(),
            daily_plan: repo.clone(),
            settings: repo,
        }
    }
}

//
// ─── IN-MEMORY ADAPTER ─────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default)]
struct ProfileData {
    tracker: TrackerLog,
    goals: BTreeMap<MonthId, MonthlyGoals>,
    resources: Vec<Resource>,
    radar: BTreeMap<MonthId, RadarSnapshot>,
    plan: DailyPlan,
}

/// Simple in-memory adapter implementing every repository trait.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    registry: Arc<Mutex<Option<RegistryRecord>>>,
    data: Arc<Mutex<HashMap<ProfileId, ProfileData>>>,
    settings: Arc<Mutex<Option<Settings>>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_profile<R>(&self, profile: &ProfileId, f: impl FnOnce(&mut ProfileData) -> R) -> R {
        let mut data = self.data.lock().expect("in-memory storage poisoned");
        f(data.entry(profile.clone()).or_default())
    }
}

impl ProfileRepository for InMemoryStorage {
    fn load_registry(&self) -> Result<Option<RegistryRecord>, StorageError> {
        Ok(self
            .registry
            .lock()
            .expect("in-memory storage poisoned")
            .clone())
    }

    fn save_registry(&self, registry: &ProfileRegistry) -> Result<(), StorageError> {
        *self.registry.lock().expect("in-memory storage poisoned") =
            Some(RegistryRecord::from_registry(registry));
        Ok(())
    }

    fn create_profile_data(&self, id: &ProfileId) -> Result<(), StorageError> {
        self.with_profile(id, |_| ());
        Ok(())
    }

    fn delete_profile_data(&self, id: &ProfileId) -> Result<(), StorageError> {
        self.data
            .lock()
            .expect("in-memory storage poisoned")
            .remove(id);
        Ok(())
    }

    fn list_profile_data(&self) -> Result<Vec<ProfileId>, StorageError> {
        Ok(self
            .data
            .lock()
            .expect("in-memory storage poisoned")
            .keys()
            .cloned()
            .collect())
    }
}

impl TrackerRepository for InMemoryStorage {
    fn load_tracker(&self, profile: &ProfileId) -> Result<TrackerLog, StorageError> {
        Ok(self.with_profile(profile, |data| data.tracker.clone()))
    }

    fn save_tracker(&self, profile: &ProfileId, log: &TrackerLog) -> Result<(), StorageError> {
        self.with_profile(profile, |data| data.tracker = log.clone());
        Ok(())
    }
}

impl GoalsRepository for InMemoryStorage {
    fn load_goals(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, MonthlyGoals>, StorageError> {
        Ok(self.with_profile(profile, |data| data.goals.clone()))
    }

    fn save_goals(
        &self,
        profile: &ProfileId,
        goals: &BTreeMap<MonthId, MonthlyGoals>,
    ) -> Result<(), StorageError> {
        self.with_profile(profile, |data| data.goals = goals.clone());
        Ok(())
    }
}

impl ResourceRepository for InMemoryStorage {
    fn load_resources(&self, profile: &ProfileId) -> Result<Vec<Resource>, StorageError> {
        Ok(self.with_profile(profile, |data| data.resources.clone()))
    }

    fn save_resources(
        &self,
        profile: &ProfileId,
        resources: &[Resource],
    ) -> Result<(), StorageError> {
        self.with_profile(profile, |data| data.resources = resources.to_vec());
        Ok(())
    }
}

impl RadarRepository for InMemoryStorage {
    fn load_snapshots(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, RadarSnapshot>, StorageError> {
        Ok(self.with_profile(profile, |data| data.radar.clone()))
    }

    fn save_snapshots(
        &self,
        profile: &ProfileId,
        snapshots: &BTreeMap<MonthId, RadarSnapshot>,
    ) -> Result<(), StorageError> {
        self.with_profile(profile, |data| data.radar = snapshots.clone());
        Ok(())
    }
}

impl DailyPlanRepository for InMemoryStorage {
    fn load_plan(&self, profile: &ProfileId) -> Result<DailyPlan, StorageError> {
        Ok(self.with_profile(profile, |data| data.plan.clone()))
    }

    fn save_plan(&self, profile: &ProfileId, plan: &DailyPlan) -> Result<(), StorageError> {
        self.with_profile(profile, |data| data.plan = plan.clone());
        Ok(())
    }
}

impl SettingsRepository for InMemoryStorage {
    fn load_settings(&self) -> Result<Settings, StorageError> {
        Ok(self
            .settings
            .lock()
            .expect("in-memory storage poisoned")
            .unwrap_or_default())
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        *self.settings.lock().expect("in-memory storage poisoned") = Some(*settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lingua_core::model::Skill;
    use lingua_core::time::fixed_now;

    #[test]
    fn storage_bundle_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Storage>();
        assert_send_sync::<InMemoryStorage>();
    }

    #[test]
    fn in_memory_registry_roundtrip() {
        let storage = Storage::in_memory();
        assert!(storage.profiles.load_registry().unwrap().is_none());

        let registry = ProfileRegistry::bootstrap(fixed_now());
        storage.profiles.save_registry(&registry).unwrap();
        let record = storage.profiles.load_registry().unwrap().unwrap();
        assert!(record.active.is_default());
        assert_eq!(record.profiles.len(), 1);
    }

    #[test]
    fn in_memory_tracker_is_profile_scoped() {
        let storage = Storage::in_memory();
        let a = ProfileId::new("a").unwrap();
        let b = ProfileId::new("b").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let mut log = TrackerLog::new();
        log.set(date, Skill::Reading, true);
        storage.tracker.save_tracker(&a, &log).unwrap();

        assert!(storage.tracker.load_tracker(&a).unwrap().is_active(date));
        assert!(!storage.tracker.load_tracker(&b).unwrap().is_active(date));
    }

    #[test]
    fn in_memory_delete_removes_only_that_profile() {
        let storage = Storage::in_memory();
        let a = ProfileId::new("a").unwrap();
        let b = ProfileId::new("b").unwrap();
        storage.profiles.create_profile_data(&a).unwrap();
        storage.profiles.create_profile_data(&b).unwrap();

        storage.profiles.delete_profile_data(&a).unwrap();
        let rest = storage.profiles.list_profile_data().unwrap();
        assert_eq!(rest, vec![b]);
    }
}
