use lingua_core::model::Settings;

use super::documents::{SettingsDocument, settings_from_document, settings_to_document};
use super::{JsonStorage, SETTINGS_FILE};
use crate::repository::{SettingsRepository, StorageError};

impl SettingsRepository for JsonStorage {
    fn load_settings(&self) -> Result<Settings, StorageError> {
        let path = self.global_path(SETTINGS_FILE);
        let doc: SettingsDocument = self.read_or_default(&path);
        Ok(settings_from_document(doc))
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.write_document(
            &self.global_path(SETTINGS_FILE),
            &settings_to_document(settings),
        )
    }
}
