use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::month::MonthId;

/// Every month has exactly this many goal slots.
pub const GOAL_SLOTS: usize = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GoalError {
    #[error("goal slot index must be 0..{GOAL_SLOTS}, got {0}")]
    SlotOutOfRange(usize),

    #[error("subtask index {0} is out of range")]
    SubtaskOutOfRange(usize),

    #[error("subtask text cannot be empty")]
    EmptySubtask,
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Coarse label attached to a goal slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    #[default]
    General,
    Reading,
    Listening,
    Speaking,
    Writing,
    Vocabulary,
    Grammar,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 7] = [
        GoalCategory::General,
        GoalCategory::Reading,
        GoalCategory::Listening,
        GoalCategory::Speaking,
        GoalCategory::Writing,
        GoalCategory::Vocabulary,
        GoalCategory::Grammar,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GoalCategory::General => "General",
            GoalCategory::Reading => "Reading",
            GoalCategory::Listening => "Listening",
            GoalCategory::Speaking => "Speaking",
            GoalCategory::Writing => "Writing",
            GoalCategory::Vocabulary => "Vocabulary",
            GoalCategory::Grammar => "Grammar",
        }
    }

    /// Parses a UI label back into a category, defaulting to `General`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── SUBTASK ───────────────────────────────────────────────────────────────────
//

/// One checklist line under a goal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subtask {
    pub text: String,
    pub done: bool,
}

impl Subtask {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

//
// ─── GOAL SLOT ─────────────────────────────────────────────────────────────────
//

/// One of the three goal slots of a month.
///
/// `created_at` is stamped when the slot first receives a title;
/// `completed_at` is stamped the first time the slot is completed and never
/// changes afterwards, even if the goal is later un-completed and completed
/// again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalSlot {
    title: String,
    category: GoalCategory,
    subtasks: Vec<Subtask>,
    reflection: String,
    completed: bool,
    created_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl GoalSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a slot from persisted fields as-is.
    #[must_use]
    pub fn from_persisted(
        title: String,
        category: GoalCategory,
        subtasks: Vec<Subtask>,
        reflection: String,
        completed: bool,
        created_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title,
            category,
            subtasks,
            reflection,
            completed,
            created_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> GoalCategory {
        self.category
    }

    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    #[must_use]
    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True when the slot carries no user data at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.subtasks.iter().all(|s| s.text.trim().is_empty())
            && self.reflection.trim().is_empty()
            && !self.completed
    }

    /// Fraction of subtasks done, as 0–100; `None` when there are none.
    #[must_use]
    pub fn subtask_progress(&self) -> Option<u8> {
        if self.subtasks.is_empty() {
            return None;
        }
        let done = self.subtasks.iter().filter(|s| s.done).count();
        Some((100 * done / self.subtasks.len()) as u8)
    }

    pub fn set_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        if self.created_at.is_none() && !self.title.trim().is_empty() {
            self.created_at = Some(now);
        }
    }

    pub fn set_category(&mut self, category: GoalCategory) {
        self.category = category;
    }

    pub fn set_reflection(&mut self, reflection: impl Into<String>) {
        self.reflection = reflection.into();
    }

    /// Appends a subtask.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptySubtask` for whitespace-only text.
    pub fn add_subtask(&mut self, text: impl Into<String>) -> Result<(), GoalError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GoalError::EmptySubtask);
        }
        self.subtasks.push(Subtask::new(text.trim().to_string()));
        Ok(())
    }

    /// Checks or unchecks a subtask.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::SubtaskOutOfRange` for a bad index.
    pub fn set_subtask_done(&mut self, index: usize, done: bool) -> Result<(), GoalError> {
        let subtask = self
            .subtasks
            .get_mut(index)
            .ok_or(GoalError::SubtaskOutOfRange(index))?;
        subtask.done = done;
        Ok(())
    }

    /// Removes a subtask outright.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::SubtaskOutOfRange` for a bad index.
    pub fn remove_subtask(&mut self, index: usize) -> Result<Subtask, GoalError> {
        if index >= self.subtasks.len() {
            return Err(GoalError::SubtaskOutOfRange(index));
        }
        Ok(self.subtasks.remove(index))
    }

    /// Marks the slot complete or incomplete.
    ///
    /// The first completion stamps `completed_at`; later transitions leave
    /// the stamp untouched.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        if completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }
}

//
// ─── MONTHLY GOALS ─────────────────────────────────────────────────────────────
//

/// The three goal slots of one calendar month, plus month-level notes.
///
/// The `archived` flag is display state maintained by the startup
/// auto-archive pass; the authoritative read-only rule is "month is before
/// the current calendar month" and is enforced at the service boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyGoals {
    month: MonthId,
    slots: [GoalSlot; GOAL_SLOTS],
    notes: String,
    archived: bool,
}

impl MonthlyGoals {
    /// A blank month.
    #[must_use]
    pub fn new(month: MonthId) -> Self {
        Self {
            month,
            slots: Default::default(),
            notes: String::new(),
            archived: false,
        }
    }

    #[must_use]
    pub fn from_persisted(
        month: MonthId,
        slots: [GoalSlot; GOAL_SLOTS],
        notes: String,
        archived: bool,
    ) -> Self {
        Self {
            month,
            slots,
            notes,
            archived,
        }
    }

    #[must_use]
    pub fn month(&self) -> MonthId {
        self.month
    }

    #[must_use]
    pub fn slots(&self) -> &[GoalSlot; GOAL_SLOTS] {
        &self.slots
    }

    /// Mutable access to one slot, bounds-checked.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::SlotOutOfRange` for an index outside 0..3.
    pub fn slot_mut(&mut self, index: usize) -> Result<&mut GoalSlot, GoalError> {
        self.slots
            .get_mut(index)
            .ok_or(GoalError::SlotOutOfRange(index))
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&GoalSlot> {
        self.slots.get(index)
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
    }

    /// True when no slot and no note carries user data.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(GoalSlot::is_blank) && self.notes.trim().is_empty()
    }

    /// Count of completed slots.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_completed()).count()
    }
}
