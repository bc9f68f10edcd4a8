use std::fmt;

use thiserror::Error;

use super::month::MonthId;
use super::skill::{Skill, SkillMap};

/// Rating bounds for a radar snapshot.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

// Largest possible mean absolute deviation for four ratings in [1, 5]
// (e.g. {1, 1, 5, 5}); the balance score maps this to 0.
const MAX_DEVIATION: f64 = 2.0;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RadarError {
    #[error("{skill} rating must be between {RATING_MIN} and {RATING_MAX}, got {value}")]
    RatingOutOfRange { skill: Skill, value: u8 },
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// One month's self-assessment: a 1–5 rating per skill.
///
/// The balance index is derived on read and never persisted, so a formula
/// change applies retroactively to every historical snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadarSnapshot {
    month: MonthId,
    ratings: SkillMap<u8>,
}

impl RadarSnapshot {
    /// Creates a snapshot, validating every rating.
    ///
    /// # Errors
    ///
    /// Returns `RadarError::RatingOutOfRange` for any rating outside 1–5.
    pub fn new(month: MonthId, ratings: SkillMap<u8>) -> Result<Self, RadarError> {
        for (skill, &value) in ratings.iter() {
            if !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(RadarError::RatingOutOfRange { skill, value });
            }
        }
        Ok(Self { month, ratings })
    }

    #[must_use]
    pub fn month(&self) -> MonthId {
        self.month
    }

    #[must_use]
    pub fn ratings(&self) -> &SkillMap<u8> {
        &self.ratings
    }

    #[must_use]
    pub fn rating(&self, skill: Skill) -> u8 {
        *self.ratings.get(skill)
    }

    /// Derived 0–100 evenness score for this snapshot.
    #[must_use]
    pub fn balance_index(&self) -> u8 {
        balance_index(&self.ratings)
    }
}

/// Computes the balance index: 100 when all four ratings are equal, falling
/// linearly with the mean absolute deviation from the mean, reaching 0 at
/// the maximum spread representable in 1–5 ratings.
///
/// Pure and order-independent; the policy lives here and nowhere else.
#[must_use]
pub fn balance_index(ratings: &SkillMap<u8>) -> u8 {
    let values: Vec<f64> = ratings.iter().map(|(_, &v)| f64::from(v)).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let deviation =
        values.iter().map(|v| (v - mean).abs()).sum::<f64>() / values.len() as f64;
    let score = 100.0 * (1.0 - deviation.min(MAX_DEVIATION) / MAX_DEVIATION);
    score.round().clamp(0.0, 100.0) as u8
}

//
// ─── TRENDS ────────────────────────────────────────────────────────────────────
//

/// Month-over-month movement of one skill rating. Presentational only,
/// recomputed on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Declined,
    #[default]
    Stable,
}

impl Trend {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Trend::Improved => "Improved",
            Trend::Declined => "Declined",
            Trend::Stable => "Stable",
        }
    }

    /// Arrow glyph for compact UI surfaces.
    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Improved => "↑",
            Trend::Declined => "↓",
            Trend::Stable => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-skill trend of `current` against the immediately preceding snapshot.
///
/// With no previous snapshot every skill reads `Stable`.
#[must_use]
pub fn trends(current: &RadarSnapshot, previous: Option<&RadarSnapshot>) -> SkillMap<Trend> {
    SkillMap::from_fn(|skill| {
        let Some(previous) = previous else {
            return Trend::Stable;
        };
        let cur = current.rating(skill);
        let prev = previous.rating(skill);
        match cur.cmp(&prev) {
            std::cmp::Ordering::Greater => Trend::Improved,
            std::cmp::Ordering::Less => Trend::Declined,
            std::cmp::Ordering::Equal => Trend::Stable,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> MonthId {
        MonthId::new(2024, 3).unwrap()
    }

    fn ratings(r: u8, l: u8, s: u8, w: u8) -> SkillMap<u8> {
        let mut map = SkillMap::default();
        map.set(Skill::Reading, r);
        map.set(Skill::Listening, l);
        map.set(Skill::Speaking, s);
        map.set(Skill::Writing, w);
        map
    }

    #[test]
    fn snapshot_rejects_out_of_range_ratings() {
        let err = RadarSnapshot::new(month(), ratings(0, 3, 3, 3)).unwrap_err();
        assert_eq!(
            err,
            RadarError::RatingOutOfRange {
                skill: Skill::Reading,
                value: 0
            }
        );
        assert!(RadarSnapshot::new(month(), ratings(3, 3, 3, 6)).is_err());
        assert!(RadarSnapshot::new(month(), ratings(1, 5, 1, 5)).is_ok());
    }

    #[test]
    fn balance_is_100_iff_all_equal() {
        for v in RATING_MIN..=RATING_MAX {
            assert_eq!(balance_index(&ratings(v, v, v, v)), 100);
        }
        assert!(balance_index(&ratings(1, 5, 1, 5)) < 100);
        assert!(balance_index(&ratings(3, 3, 3, 4)) < 100);
    }

    #[test]
    fn balance_is_permutation_invariant() {
        let base = balance_index(&ratings(2, 5, 3, 1));
        assert_eq!(balance_index(&ratings(5, 2, 1, 3)), base);
        assert_eq!(balance_index(&ratings(1, 3, 5, 2)), base);
        assert_eq!(balance_index(&ratings(3, 1, 2, 5)), base);
    }

    #[test]
    fn balance_hits_zero_at_maximum_spread() {
        assert_eq!(balance_index(&ratings(1, 1, 5, 5)), 0);
    }

    #[test]
    fn balance_orders_by_evenness() {
        let tight = balance_index(&ratings(3, 3, 3, 4));
        let loose = balance_index(&ratings(1, 5, 1, 5));
        assert!(tight > loose);
    }

    #[test]
    fn trends_compare_against_previous_month() {
        let prev = RadarSnapshot::new(month().prev(), ratings(3, 3, 3, 3)).unwrap();
        let cur = RadarSnapshot::new(month(), ratings(4, 2, 3, 5)).unwrap();

        let t = trends(&cur, Some(&prev));
        assert_eq!(*t.get(Skill::Reading), Trend::Improved);
        assert_eq!(*t.get(Skill::Listening), Trend::Declined);
        assert_eq!(*t.get(Skill::Speaking), Trend::Stable);
        assert_eq!(*t.get(Skill::Writing), Trend::Improved);
    }

    #[test]
    fn trends_are_stable_without_previous() {
        let cur = RadarSnapshot::new(month(), ratings(4, 2, 3, 5)).unwrap();
        let t = trends(&cur, None);
        assert!(Skill::ALL.iter().all(|&s| *t.get(s) == Trend::Stable));
    }
}
