use lingua_core::model::{ProfileId, TrackerLog};

use super::documents::{TrackerDocument, tracker_from_document, tracker_to_document};
use super::{JsonStorage, TRACKER_FILE};
use crate::repository::{StorageError, TrackerRepository};

impl TrackerRepository for JsonStorage {
    fn load_tracker(&self, profile: &ProfileId) -> Result<TrackerLog, StorageError> {
        let path = self.profile_path(profile, TRACKER_FILE);
        let doc: TrackerDocument = self.read_or_default(&path);
        let mapped = tracker_from_document(doc);
        if mapped.skipped > 0 {
            self.warn_once(
                &path,
                &format!("dropped {} entries with malformed dates", mapped.skipped),
            );
        }
        Ok(mapped.value)
    }

    fn save_tracker(&self, profile: &ProfileId, log: &TrackerLog) -> Result<(), StorageError> {
        self.write_document(
            &self.profile_path(profile, TRACKER_FILE),
            &tracker_to_document(log),
        )
    }
}
