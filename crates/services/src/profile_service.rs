use std::sync::Arc;

use tracing::{info, warn};

use lingua_core::model::{Profile, ProfileId, ProfileRegistry};
use storage::repository::ProfileRepository;

use crate::Clock;
use crate::error::ProfileServiceError;

/// Profile isolation and lifecycle.
///
/// The registry document is the single source of truth for which profiles
/// exist and which one is active; nothing is cached between calls, so
/// every operation observes (and persists) the registry afresh. That makes
/// profile isolation an invariant of the data, not of in-memory state.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, repo }
    }

    /// Load the registry, bootstrapping it (default profile, active) on
    /// first run.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` on storage failures.
    pub fn registry(&self) -> Result<ProfileRegistry, ProfileServiceError> {
        let now = self.clock.now();
        match self.repo.load_registry()? {
            Some(record) => Ok(ProfileRegistry::from_persisted(
                record.active,
                record.profiles,
                now,
            )),
            None => {
                let registry = ProfileRegistry::bootstrap(now);
                self.repo.create_profile_data(registry.active())?;
                self.repo.save_registry(&registry)?;
                Ok(registry)
            }
        }
    }

    /// All registered profiles.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` on storage failures.
    pub fn list(&self) -> Result<Vec<Profile>, ProfileServiceError> {
        Ok(self.registry()?.profiles().to_vec())
    }

    /// The currently active profile id.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` on storage failures.
    pub fn active(&self) -> Result<ProfileId, ProfileServiceError> {
        Ok(self.registry()?.active().clone())
    }

    /// Create a profile from a display name and return its new id.
    ///
    /// The id is a slug of the name; collisions get a numeric suffix, so
    /// two profiles named "Spanish" become `spanish` and `spanish-1`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if the name is out of bounds or
    /// unusable, the profile cap is reached, or persistence fails.
    pub fn create(&self, display_name: &str) -> Result<ProfileId, ProfileServiceError> {
        let mut registry = self.registry()?;

        let base = ProfileId::from_display_name(display_name)?;
        let id = registry.next_free_id(&base);
        let profile = Profile::new(id.clone(), display_name, self.clock.now())?;
        registry.add(profile)?;

        self.repo.create_profile_data(&id)?;
        self.repo.save_registry(&registry)?;
        info!(profile = %id, "created profile");
        Ok(id)
    }

    /// Change a profile's display name. The id and every document location
    /// stay as they are.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for an unknown id, an out-of-bounds
    /// name, or persistence failures.
    pub fn rename(
        &self,
        id: &ProfileId,
        new_name: &str,
    ) -> Result<(), ProfileServiceError> {
        let mut registry = self.registry()?;
        registry.rename(id, new_name)?;
        self.repo.save_registry(&registry)?;
        Ok(())
    }

    /// Delete a profile and its entire document set.
    ///
    /// The active and the default profile are protected. The registry
    /// entry is removed first; if the directory deletion then fails, the
    /// directory is left behind as an orphan and swept on the next
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for protected or unknown ids and for
    /// registry persistence failures.
    pub fn delete(&self, id: &ProfileId) -> Result<(), ProfileServiceError> {
        let mut registry = self.registry()?;
        registry.remove(id)?;
        self.repo.save_registry(&registry)?;

        if let Err(err) = self.repo.delete_profile_data(id) {
            warn!(profile = %id, "profile data left behind for orphan sweep: {err}");
        }
        info!(profile = %id, "deleted profile");
        Ok(())
    }

    /// Switch the active profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if the id is not registered or the
    /// registry cannot be written.
    pub fn set_active(&self, id: &ProfileId) -> Result<(), ProfileServiceError> {
        let mut registry = self.registry()?;
        registry.set_active(id, self.clock.now())?;
        self.repo.save_registry(&registry)?;
        info!(profile = %id, "switched active profile");
        Ok(())
    }

    /// Startup routine: bootstrap/repair the registry, make sure the
    /// active profile's directory exists, and sweep orphaned directories
    /// that no registry entry references. Returns the active profile id.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` on storage failures.
    pub fn initialize(&self) -> Result<ProfileId, ProfileServiceError> {
        let mut registry = self.registry()?;
        let repaired = registry.ensure_default(self.clock.now());
        if repaired {
            self.repo.save_registry(&registry)?;
        }

        let active = registry.active().clone();
        self.repo.create_profile_data(&active)?;

        let swept = self.sweep_orphans(&registry)?;
        if swept > 0 {
            info!(count = swept, "removed orphaned profile directories");
        }

        Ok(active)
    }

    fn sweep_orphans(&self, registry: &ProfileRegistry) -> Result<usize, ProfileServiceError> {
        let mut removed = 0;
        for id in self.repo.list_profile_data()? {
            if registry.contains(&id) {
                continue;
            }
            match self.repo.delete_profile_data(&id) {
                Ok(()) => removed += 1,
                Err(err) => warn!(profile = %id, "could not remove orphaned directory: {err}"),
            }
        }
        Ok(removed)
    }
}
