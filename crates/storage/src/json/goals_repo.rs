use std::collections::BTreeMap;

use lingua_core::model::{MonthId, MonthlyGoals, ProfileId};

use super::documents::{GoalsDocument, goals_from_document, goals_to_document};
use super::{GOALS_FILE, JsonStorage};
use crate::repository::{GoalsRepository, StorageError};

impl GoalsRepository for JsonStorage {
    fn load_goals(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, MonthlyGoals>, StorageError> {
        let path = self.profile_path(profile, GOALS_FILE);
        let doc: GoalsDocument = self.read_or_default(&path);
        let mapped = goals_from_document(doc);
        if mapped.skipped > 0 {
            self.warn_once(
                &path,
                &format!("dropped {} entries with malformed months", mapped.skipped),
            );
        }
        Ok(mapped.value)
    }

    fn save_goals(
        &self,
        profile: &ProfileId,
        goals: &BTreeMap<MonthId, MonthlyGoals>,
    ) -> Result<(), StorageError> {
        self.write_document(
            &self.profile_path(profile, GOALS_FILE),
            &goals_to_document(goals),
        )
    }
}
