use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed practice categories.
///
/// The skill set is closed: every tracker day, radar snapshot and statistic
/// covers exactly these four, in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Reading,
    Listening,
    Speaking,
    Writing,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Reading,
        Skill::Listening,
        Skill::Speaking,
        Skill::Writing,
    ];

    /// Human-readable label for UI surfaces.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Skill::Reading => "Reading",
            Skill::Listening => "Listening",
            Skill::Speaking => "Speaking",
            Skill::Writing => "Writing",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dense map with exactly one value per skill.
///
/// Serializes as an object keyed by the lowercase skill names, which is also
/// the persisted document shape for tracker days and radar ratings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMap<T> {
    #[serde(default)]
    reading: T,
    #[serde(default)]
    listening: T,
    #[serde(default)]
    speaking: T,
    #[serde(default)]
    writing: T,
}

impl<T> SkillMap<T> {
    /// Builds a map by evaluating `f` once per skill, in `Skill::ALL` order.
    pub fn from_fn(mut f: impl FnMut(Skill) -> T) -> Self {
        Self {
            reading: f(Skill::Reading),
            listening: f(Skill::Listening),
            speaking: f(Skill::Speaking),
            writing: f(Skill::Writing),
        }
    }

    /// Builds a map holding the same value for every skill.
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, skill: Skill) -> &T {
        match skill {
            Skill::Reading => &self.reading,
            Skill::Listening => &self.listening,
            Skill::Speaking => &self.speaking,
            Skill::Writing => &self.writing,
        }
    }

    pub fn set(&mut self, skill: Skill, value: T) {
        match skill {
            Skill::Reading => self.reading = value,
            Skill::Listening => self.listening = value,
            Skill::Speaking => self.speaking = value,
            Skill::Writing => self.writing = value,
        }
    }

    /// Iterates entries in `Skill::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, &T)> {
        Skill::ALL.into_iter().map(move |skill| (skill, self.get(skill)))
    }

    /// Maps every value, preserving skill order.
    pub fn map<U>(&self, mut f: impl FnMut(Skill, &T) -> U) -> SkillMap<U> {
        SkillMap::from_fn(|skill| f(skill, self.get(skill)))
    }
}

impl SkillMap<bool> {
    /// True if any skill is marked.
    #[must_use]
    pub fn any(&self) -> bool {
        self.reading || self.listening || self.speaking || self.writing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_four_skills_in_order() {
        assert_eq!(Skill::ALL.len(), 4);
        assert_eq!(Skill::ALL[0], Skill::Reading);
        assert_eq!(Skill::ALL[3], Skill::Writing);
    }

    #[test]
    fn map_get_set_roundtrip() {
        let mut map = SkillMap::<u8>::default();
        map.set(Skill::Speaking, 4);
        assert_eq!(*map.get(Skill::Speaking), 4);
        assert_eq!(*map.get(Skill::Reading), 0);
    }

    #[test]
    fn any_requires_at_least_one_true() {
        let mut map = SkillMap::<bool>::default();
        assert!(!map.any());
        map.set(Skill::Writing, true);
        assert!(map.any());
    }

    #[test]
    fn serde_shape_uses_lowercase_skill_keys() {
        let mut map = SkillMap::<bool>::default();
        map.set(Skill::Reading, true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"reading":true,"listening":false,"speaking":false,"writing":false}"#
        );
    }

    #[test]
    fn serde_fills_missing_skills_with_default() {
        let map: SkillMap<bool> = serde_json::from_str(r#"{"reading":true}"#).unwrap();
        assert!(*map.get(Skill::Reading));
        assert!(!*map.get(Skill::Listening));
    }
}
