use std::collections::BTreeMap;

use lingua_core::model::{MonthId, ProfileId, RadarSnapshot};

use super::documents::{RadarDocument, radar_from_document, radar_to_document};
use super::{JsonStorage, RADAR_FILE};
use crate::repository::{RadarRepository, StorageError};

impl RadarRepository for JsonStorage {
    fn load_snapshots(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, RadarSnapshot>, StorageError> {
        let path = self.profile_path(profile, RADAR_FILE);
        let doc: RadarDocument = self.read_or_default(&path);
        let mapped = radar_from_document(doc);
        if mapped.skipped > 0 {
            self.warn_once(
                &path,
                &format!("dropped {} invalid radar entries", mapped.skipped),
            );
        }
        Ok(mapped.value)
    }

    fn save_snapshots(
        &self,
        profile: &ProfileId,
        snapshots: &BTreeMap<MonthId, RadarSnapshot>,
    ) -> Result<(), StorageError> {
        self.write_document(
            &self.profile_path(profile, RADAR_FILE),
            &radar_to_document(snapshots),
        )
    }
}
