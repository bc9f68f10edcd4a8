use std::sync::Arc;

use lingua_core::model::{Settings, SettingsDraft};
use storage::repository::SettingsRepository;

use crate::error::SettingsServiceError;

/// Global settings, shared across all profiles.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub fn load(&self) -> Result<Settings, SettingsServiceError> {
        Ok(self.repo.load_settings()?)
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence
    /// fails; nothing is written on rejection.
    pub fn save(&self, draft: SettingsDraft) -> Result<Settings, SettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings)?;
        Ok(settings)
    }
}
