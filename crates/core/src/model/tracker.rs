use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::month::MonthId;
use super::skill::{Skill, SkillMap};

/// Per-day practice log: which of the four skills were practiced on which
/// date.
///
/// A day is *active* iff at least one skill is marked. Days are kept sparse;
/// a day every skill of which is unmarked is dropped from the map so the
/// persisted document only carries days with data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackerLog {
    days: BTreeMap<NaiveDate, SkillMap<bool>>,
}

/// Derived statistics for one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthStats {
    pub month: MonthId,
    pub days_in_month: u32,
    pub active_days: u32,
    pub longest_streak: u32,
    pub per_skill_percent: SkillMap<u8>,
}

impl TrackerLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_days(days: BTreeMap<NaiveDate, SkillMap<bool>>) -> Self {
        let days = days.into_iter().filter(|(_, skills)| skills.any()).collect();
        Self { days }
    }

    #[must_use]
    pub fn days(&self) -> &BTreeMap<NaiveDate, SkillMap<bool>> {
        &self.days
    }

    /// The skill marks for a day; all-false for days with no record.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> SkillMap<bool> {
        self.days.get(&date).copied().unwrap_or_default()
    }

    /// True iff at least one skill is marked on `date`.
    #[must_use]
    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.days.get(&date).is_some_and(SkillMap::any)
    }

    /// Marks or unmarks one skill on one day.
    pub fn set(&mut self, date: NaiveDate, skill: Skill, done: bool) {
        let mut day = self.day(date);
        day.set(skill, done);
        if day.any() {
            self.days.insert(date, day);
        } else {
            self.days.remove(&date);
        }
    }

    /// Flips one skill on one day; returns the new value.
    pub fn toggle(&mut self, date: NaiveDate, skill: Skill) -> bool {
        let next = !*self.day(date).get(skill);
        self.set(date, skill, next);
        next
    }

    /// Number of consecutive active days ending at `date` (inclusive).
    ///
    /// Walks backwards across month boundaries, so this is the "current
    /// streak" figure when called with today's date.
    #[must_use]
    pub fn streak_ending(&self, date: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut cursor = date;
        while self.is_active(cursor) {
            streak += 1;
            match cursor.pred_opt() {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        streak
    }

    /// Month statistics: active days, longest in-month streak and per-skill
    /// completion percentages over the whole month.
    #[must_use]
    pub fn month_stats(&self, month: MonthId) -> MonthStats {
        let days_in_month = month.days_in_month();
        let mut active_days = 0;
        let mut longest_streak = 0;
        let mut run = 0;
        let mut per_skill_counts = SkillMap::<u32>::default();

        for day in 1..=days_in_month {
            let Some(date) = month.day(day) else { continue };
            let marks = self.day(date);
            if marks.any() {
                active_days += 1;
                run += 1;
                longest_streak = longest_streak.max(run);
            } else {
                run = 0;
            }
            for skill in Skill::ALL {
                if *marks.get(skill) {
                    let count = *per_skill_counts.get(skill) + 1;
                    per_skill_counts.set(skill, count);
                }
            }
        }

        let per_skill_percent =
            per_skill_counts.map(|_, count| (100 * count / days_in_month.max(1)) as u8);

        MonthStats {
            month,
            days_in_month,
            active_days,
            longest_streak,
            per_skill_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_is_active_iff_any_skill_marked() {
        let mut log = TrackerLog::new();
        let today = date(2024, 3, 10);
        assert!(!log.is_active(today));

        log.set(today, Skill::Listening, true);
        assert!(log.is_active(today));

        log.set(today, Skill::Listening, false);
        assert!(!log.is_active(today));
    }

    #[test]
    fn all_false_days_are_pruned() {
        let mut log = TrackerLog::new();
        let today = date(2024, 3, 10);
        log.set(today, Skill::Reading, true);
        log.set(today, Skill::Reading, false);
        assert!(log.days().is_empty());

        let mut seeded = BTreeMap::new();
        seeded.insert(today, SkillMap::default());
        assert!(TrackerLog::from_days(seeded).days().is_empty());
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut log = TrackerLog::new();
        let today = date(2024, 3, 10);
        assert!(log.toggle(today, Skill::Writing));
        assert!(!log.toggle(today, Skill::Writing));
    }

    #[test]
    fn month_stats_counts_active_days_and_streaks() {
        let mut log = TrackerLog::new();
        // Active on the 1st-3rd and the 5th; the 4th breaks the streak.
        for d in [1, 2, 3, 5] {
            log.set(date(2024, 3, d), Skill::Reading, true);
        }
        log.set(date(2024, 3, 5), Skill::Speaking, true);

        let stats = log.month_stats(MonthId::new(2024, 3).unwrap());
        assert_eq!(stats.days_in_month, 31);
        assert_eq!(stats.active_days, 4);
        assert_eq!(stats.longest_streak, 3);
        // 4 of 31 reading days, truncated percentage.
        assert_eq!(*stats.per_skill_percent.get(Skill::Reading), 12);
        assert_eq!(*stats.per_skill_percent.get(Skill::Speaking), 3);
        assert_eq!(*stats.per_skill_percent.get(Skill::Writing), 0);
    }

    #[test]
    fn month_stats_ignores_other_months() {
        let mut log = TrackerLog::new();
        log.set(date(2024, 2, 29), Skill::Reading, true);
        let stats = log.month_stats(MonthId::new(2024, 3).unwrap());
        assert_eq!(stats.active_days, 0);
    }

    #[test]
    fn streak_ending_crosses_month_boundary() {
        let mut log = TrackerLog::new();
        log.set(date(2024, 2, 28), Skill::Reading, true);
        log.set(date(2024, 2, 29), Skill::Reading, true);
        log.set(date(2024, 3, 1), Skill::Listening, true);
        assert_eq!(log.streak_ending(date(2024, 3, 1)), 3);
        assert_eq!(log.streak_ending(date(2024, 3, 2)), 0);
    }
}
