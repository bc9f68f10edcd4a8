use std::fs;
use std::io;

use lingua_core::model::{ProfileId, ProfileRegistry};

use super::documents::{registry_from_document, registry_to_document};
use super::{JsonStorage, REGISTRY_FILE, io_error};
use crate::repository::{ProfileRepository, RegistryRecord, StorageError};

impl ProfileRepository for JsonStorage {
    fn load_registry(&self) -> Result<Option<RegistryRecord>, StorageError> {
        let path = self.global_path(REGISTRY_FILE);
        let Some(doc) = self.read_optional(&path) else {
            return Ok(None);
        };
        let mapped = registry_from_document(doc);
        if mapped.skipped > 0 {
            self.warn_once(
                &path,
                &format!("dropped {} malformed profile entries", mapped.skipped),
            );
        }
        Ok(Some(mapped.value))
    }

    fn save_registry(&self, registry: &ProfileRegistry) -> Result<(), StorageError> {
        let record = RegistryRecord::from_registry(registry);
        self.write_document(&self.global_path(REGISTRY_FILE), &registry_to_document(&record))
    }

    fn create_profile_data(&self, id: &ProfileId) -> Result<(), StorageError> {
        let dir = self.profile_dir(id);
        fs::create_dir_all(&dir).map_err(|err| io_error(&dir, &err))
    }

    fn delete_profile_data(&self, id: &ProfileId) -> Result<(), StorageError> {
        let dir = self.profile_dir(id);
        // Only ever delete directly inside the profiles directory.
        if dir.parent() != Some(self.profiles_dir().as_path()) {
            return Err(StorageError::Io(format!(
                "refusing to delete outside the profiles directory: {}",
                dir.display()
            )));
        }
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&dir, &err)),
        }
    }

    fn list_profile_data(&self) -> Result<Vec<ProfileId>, StorageError> {
        let dir = self.profiles_dir();
        let entries = fs::read_dir(&dir).map_err(|err| io_error(&dir, &err))?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| io_error(&dir, &err))?;
            let is_dir = entry
                .file_type()
                .map_err(|err| io_error(&entry.path(), &err))?
                .is_dir();
            if !is_dir {
                continue;
            }
            let name = entry.file_name();
            // Directories that are not valid profile ids are ignored here;
            // the orphan sweep never touches them.
            if let Some(id) = name.to_str().and_then(|raw| ProfileId::new(raw).ok()) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}
