use std::sync::Arc;

use chrono::NaiveDate;

use lingua_core::model::{MonthId, MonthStats, ProfileId, Skill, TrackerLog};
use storage::repository::TrackerRepository;

use crate::Clock;
use crate::error::TrackerServiceError;

/// Daily practice log: per-day, per-skill completion marks and the derived
/// month statistics.
#[derive(Clone)]
pub struct TrackerService {
    clock: Clock,
    repo: Arc<dyn TrackerRepository>,
}

impl TrackerService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn TrackerRepository>) -> Self {
        Self { clock, repo }
    }

    /// The full practice log for a profile.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError` on storage failures.
    pub fn log(&self, profile: &ProfileId) -> Result<TrackerLog, TrackerServiceError> {
        Ok(self.repo.load_tracker(profile)?)
    }

    /// Mark or unmark one skill on one day and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError` if the write fails; the stored log is
    /// unchanged in that case.
    pub fn set_day(
        &self,
        profile: &ProfileId,
        date: NaiveDate,
        skill: Skill,
        done: bool,
    ) -> Result<TrackerLog, TrackerServiceError> {
        let mut log = self.repo.load_tracker(profile)?;
        log.set(date, skill, done);
        self.repo.save_tracker(profile, &log)?;
        Ok(log)
    }

    /// Flip one skill on one day and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError` if the write fails.
    pub fn toggle(
        &self,
        profile: &ProfileId,
        date: NaiveDate,
        skill: Skill,
    ) -> Result<TrackerLog, TrackerServiceError> {
        let mut log = self.repo.load_tracker(profile)?;
        log.toggle(date, skill);
        self.repo.save_tracker(profile, &log)?;
        Ok(log)
    }

    /// Month statistics for the given month.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError` on storage failures.
    pub fn month_stats(
        &self,
        profile: &ProfileId,
        month: MonthId,
    ) -> Result<MonthStats, TrackerServiceError> {
        Ok(self.repo.load_tracker(profile)?.month_stats(month))
    }

    /// Consecutive active days ending today.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError` on storage failures.
    pub fn current_streak(&self, profile: &ProfileId) -> Result<u32, TrackerServiceError> {
        Ok(self
            .repo
            .load_tracker(profile)?
            .streak_ending(self.clock.today()))
    }
}
