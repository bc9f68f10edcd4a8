use lingua_core::model::{DailyPlan, ProfileId};

use super::documents::{DailyPlanDocument, plan_from_document, plan_to_document};
use super::{DAILY_PLAN_FILE, JsonStorage};
use crate::repository::{DailyPlanRepository, StorageError};

impl DailyPlanRepository for JsonStorage {
    fn load_plan(&self, profile: &ProfileId) -> Result<DailyPlan, StorageError> {
        let path = self.profile_path(profile, DAILY_PLAN_FILE);
        let doc: DailyPlanDocument = self.read_or_default(&path);
        Ok(plan_from_document(doc))
    }

    fn save_plan(&self, profile: &ProfileId, plan: &DailyPlan) -> Result<(), StorageError> {
        self.write_document(
            &self.profile_path(profile, DAILY_PLAN_FILE),
            &plan_to_document(plan),
        )
    }
}
