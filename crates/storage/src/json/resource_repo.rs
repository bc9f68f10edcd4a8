use lingua_core::model::{ProfileId, Resource};

use super::documents::{ResourcesDocument, resources_from_document, resources_to_document};
use super::{JsonStorage, RESOURCES_FILE};
use crate::repository::{ResourceRepository, StorageError};

impl ResourceRepository for JsonStorage {
    fn load_resources(&self, profile: &ProfileId) -> Result<Vec<Resource>, StorageError> {
        let path = self.profile_path(profile, RESOURCES_FILE);
        let doc: ResourcesDocument = self.read_or_default(&path);
        let mapped = resources_from_document(doc);
        if mapped.skipped > 0 {
            self.warn_once(
                &path,
                &format!("dropped {} invalid resource entries", mapped.skipped),
            );
        }
        Ok(mapped.value)
    }

    fn save_resources(
        &self,
        profile: &ProfileId,
        resources: &[Resource],
    ) -> Result<(), StorageError> {
        self.write_document(
            &self.profile_path(profile, RESOURCES_FILE),
            &resources_to_document(resources),
        )
    }
}
