use std::sync::Arc;

use lingua_core::model::{DailyPlan, ProfileId};
use storage::repository::DailyPlanRepository;

use crate::error::DailyPlanServiceError;

/// The four-slot daily plan, overwritten in place.
#[derive(Clone)]
pub struct DailyPlanService {
    repo: Arc<dyn DailyPlanRepository>,
}

impl DailyPlanService {
    #[must_use]
    pub fn new(repo: Arc<dyn DailyPlanRepository>) -> Self {
        Self { repo }
    }

    /// The plan for a profile; blank when never saved.
    ///
    /// # Errors
    ///
    /// Returns `DailyPlanServiceError` on storage failures.
    pub fn load(&self, profile: &ProfileId) -> Result<DailyPlan, DailyPlanServiceError> {
        Ok(self.repo.load_plan(profile)?)
    }

    /// Overwrite one task slot and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns `DailyPlanServiceError` for a bad slot index or a failed
    /// write.
    pub fn set_task(
        &self,
        profile: &ProfileId,
        slot: usize,
        text: &str,
    ) -> Result<DailyPlan, DailyPlanServiceError> {
        let mut plan = self.repo.load_plan(profile)?;
        plan.set_task(slot, text)?;
        self.repo.save_plan(profile, &plan)?;
        Ok(plan)
    }

    /// Replace the whole plan.
    ///
    /// # Errors
    ///
    /// Returns `DailyPlanServiceError` on a failed write.
    pub fn save(
        &self,
        profile: &ProfileId,
        plan: &DailyPlan,
    ) -> Result<(), DailyPlanServiceError> {
        Ok(self.repo.save_plan(profile, plan)?)
    }
}
