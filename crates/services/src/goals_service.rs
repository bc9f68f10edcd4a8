use std::sync::Arc;

use lingua_core::model::{GoalCategory, MonthId, MonthlyGoals, ProfileId};
use storage::repository::GoalsRepository;

use crate::Clock;
use crate::error::GoalsServiceError;

/// Monthly goals: three slots per month, subtasks, reflections and the
/// archive rule.
///
/// A month strictly before the clock's current calendar month is read-only;
/// every mutating operation checks that boundary before touching storage,
/// so a rejected edit never reaches disk. The persisted `archived` flag is
/// display state kept up to date by `auto_archive_past`.
#[derive(Clone)]
pub struct GoalsService {
    clock: Clock,
    repo: Arc<dyn GoalsRepository>,
}

impl GoalsService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn GoalsRepository>) -> Self {
        Self { clock, repo }
    }

    /// The month edits are currently allowed in.
    #[must_use]
    pub fn current_month(&self) -> MonthId {
        self.clock.current_month()
    }

    /// Goals for one month, default-blank when nothing was saved yet. The
    /// `archived` flag reflects the calendar even if the auto-archive pass
    /// has not run.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` on storage failures.
    pub fn goals_for_month(
        &self,
        profile: &ProfileId,
        month: MonthId,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        let mut monthly = self
            .repo
            .load_goals(profile)?
            .remove(&month)
            .unwrap_or_else(|| MonthlyGoals::new(month));
        if month < self.current_month() {
            monthly.set_archived(true);
        }
        Ok(monthly)
    }

    /// Every saved month, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` on storage failures.
    pub fn all_months(&self, profile: &ProfileId) -> Result<Vec<MonthlyGoals>, GoalsServiceError> {
        Ok(self.repo.load_goals(profile)?.into_values().collect())
    }

    /// Replace one month's record wholesale.
    ///
    /// Writing an effectively blank month over existing non-blank data is
    /// skipped, so a half-initialized editor can never clobber real
    /// content; the existing record is returned in that case.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError::MonthArchived` for past months, or a
    /// storage error.
    pub fn save_month(
        &self,
        profile: &ProfileId,
        monthly: MonthlyGoals,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        let month = monthly.month();
        self.guard_editable(month)?;

        let mut all = self.repo.load_goals(profile)?;
        if monthly.is_blank() {
            if let Some(existing) = all.get(&month) {
                if !existing.is_blank() {
                    return Ok(existing.clone());
                }
            }
        }
        all.insert(month, monthly.clone());
        self.repo.save_goals(profile, &all)?;
        Ok(monthly)
    }

    /// Set a slot's title.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, bad slot indices
    /// or storage failures.
    pub fn set_title(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        title: &str,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        let now = self.clock.now();
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.set_title(title, now);
            Ok(())
        })
    }

    /// Set a slot's category.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, bad slot indices
    /// or storage failures.
    pub fn set_category(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        category: GoalCategory,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.set_category(category);
            Ok(())
        })
    }

    /// Set a slot's reflection text.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, bad slot indices
    /// or storage failures.
    pub fn set_reflection(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        reflection: &str,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.set_reflection(reflection);
            Ok(())
        })
    }

    /// Set the month-level notes.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months or storage
    /// failures.
    pub fn set_notes(
        &self,
        profile: &ProfileId,
        month: MonthId,
        notes: &str,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.update(profile, month, |monthly| {
            monthly.set_notes(notes);
            Ok(())
        })
    }

    /// Append a subtask to a slot.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, empty subtask
    /// text, bad indices or storage failures.
    pub fn add_subtask(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        text: &str,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.add_subtask(text)
        })
    }

    /// Check or uncheck a subtask.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, bad indices or
    /// storage failures.
    pub fn set_subtask_done(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        subtask: usize,
        done: bool,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.set_subtask_done(subtask, done)
        })
    }

    /// Remove a subtask after user confirmation.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, bad indices or
    /// storage failures.
    pub fn remove_subtask(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        subtask: usize,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.remove_subtask(subtask).map(|_| ())
        })
    }

    /// Mark a slot complete or incomplete. The first completion stamps
    /// `completed_at`; the stamp never changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` for archived months, bad indices or
    /// storage failures.
    pub fn set_completed(
        &self,
        profile: &ProfileId,
        month: MonthId,
        slot: usize,
        completed: bool,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        let now = self.clock.now();
        self.update(profile, month, |monthly| {
            monthly.slot_mut(slot)?.set_completed(completed, now);
            Ok(())
        })
    }

    /// Flag every month before the current one as archived. Returns how
    /// many records changed. Runs at startup.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError` on storage failures.
    pub fn auto_archive_past(&self, profile: &ProfileId) -> Result<usize, GoalsServiceError> {
        let current = self.current_month();
        let mut all = self.repo.load_goals(profile)?;
        let mut changed = 0;
        for (month, monthly) in &mut all {
            if *month < current && !monthly.is_archived() {
                monthly.set_archived(true);
                changed += 1;
            }
        }
        if changed > 0 {
            self.repo.save_goals(profile, &all)?;
        }
        Ok(changed)
    }

    fn guard_editable(&self, month: MonthId) -> Result<(), GoalsServiceError> {
        if month < self.current_month() {
            return Err(GoalsServiceError::MonthArchived(month));
        }
        Ok(())
    }

    fn update(
        &self,
        profile: &ProfileId,
        month: MonthId,
        mutate: impl FnOnce(&mut MonthlyGoals) -> Result<(), lingua_core::model::GoalError>,
    ) -> Result<MonthlyGoals, GoalsServiceError> {
        self.guard_editable(month)?;

        let mut all = self.repo.load_goals(profile)?;
        let mut monthly = all
            .remove(&month)
            .unwrap_or_else(|| MonthlyGoals::new(month));
        mutate(&mut monthly)?;
        all.insert(month, monthly.clone());
        self.repo.save_goals(profile, &all)?;
        Ok(monthly)
    }
}
