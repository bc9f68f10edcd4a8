use thiserror::Error;

/// The daily plan always has exactly this many task slots.
pub const PLAN_SLOTS: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DailyPlanError {
    #[error("plan slot index must be 0..{PLAN_SLOTS}, got {0}")]
    SlotOutOfRange(usize),
}

/// Four short free-text task slots, not tied to any date; edits overwrite
/// in place.
///
/// `show_on_startup` is a legacy carry-over: older data had the startup
/// toggle here before it moved to the global settings, and it is still
/// honored as a fallback when the settings flag is off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyPlan {
    tasks: [String; PLAN_SLOTS],
    show_on_startup: bool,
}

impl DailyPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from an arbitrary task list, padding or truncating to
    /// exactly four slots.
    #[must_use]
    pub fn from_tasks(tasks: Vec<String>, show_on_startup: bool) -> Self {
        let mut slots: [String; PLAN_SLOTS] = Default::default();
        for (slot, task) in slots.iter_mut().zip(tasks) {
            *slot = task;
        }
        Self {
            tasks: slots,
            show_on_startup,
        }
    }

    #[must_use]
    pub fn tasks(&self) -> &[String; PLAN_SLOTS] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, slot: usize) -> Option<&str> {
        self.tasks.get(slot).map(String::as_str)
    }

    /// Overwrites one slot.
    ///
    /// # Errors
    ///
    /// Returns `DailyPlanError::SlotOutOfRange` for an index outside 0..4.
    pub fn set_task(
        &mut self,
        slot: usize,
        text: impl Into<String>,
    ) -> Result<(), DailyPlanError> {
        let entry = self
            .tasks
            .get_mut(slot)
            .ok_or(DailyPlanError::SlotOutOfRange(slot))?;
        *entry = text.into();
        Ok(())
    }

    #[must_use]
    pub fn show_on_startup(&self) -> bool {
        self.show_on_startup
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.tasks.iter().all(|t| t.trim().is_empty())
    }
}
