use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard cap on the number of profiles in the registry.
pub const MAX_PROFILES: usize = 50;

/// Display-name length bounds, in characters, after trimming.
pub const PROFILE_NAME_MIN: usize = 1;
pub const PROFILE_NAME_MAX: usize = 30;

/// Ids that would collide with fixed files or directories under the data
/// root. "default" is additionally off-limits for user-created profiles;
/// only the built-in default profile carries it.
const RESERVED_IDS: [&str; 5] = ["settings", "profiles", "temp", "backup", "default"];

const DEFAULT_PROFILE_ID: &str = "default";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("profile name must be between {PROFILE_NAME_MIN} and {PROFILE_NAME_MAX} characters")]
    NameLength,

    #[error("profile name contains no usable characters")]
    UnusableName,

    #[error("{0:?} is a reserved name")]
    ReservedName(String),

    #[error("profile id contains invalid characters")]
    InvalidId,

    #[error("maximum number of profiles ({MAX_PROFILES}) reached")]
    LimitReached,

    #[error("profile {0} already exists")]
    DuplicateId(ProfileId),

    #[error("profile {0} does not exist")]
    UnknownProfile(ProfileId),

    #[error("cannot delete the currently active profile")]
    DeleteActive,

    #[error("cannot delete the default profile")]
    DeleteDefault,
}

//
// ─── PROFILE ID ────────────────────────────────────────────────────────────────
//

/// Stable, filesystem-safe profile identifier.
///
/// Ids are lowercase ASCII letters, digits, `-` and `_`, derived from the
/// display name at creation time and immutable afterwards. The id doubles as
/// the per-profile directory name under the data root.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(String);

impl ProfileId {
    /// Wraps an already-slugged id, validating the character set.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidId` if `raw` is empty or contains
    /// characters outside `[a-z0-9-_]`.
    pub fn new(raw: impl Into<String>) -> Result<Self, ProfileError> {
        let raw = raw.into();
        if raw.is_empty() || !raw.chars().all(is_id_char) {
            return Err(ProfileError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// The id of the built-in default profile.
    #[must_use]
    pub fn default_profile() -> Self {
        Self(DEFAULT_PROFILE_ID.to_string())
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_PROFILE_ID
    }

    /// Derives a candidate id from a display name.
    ///
    /// Lowercases, maps whitespace to `-`, strips everything outside
    /// `[a-z0-9-_]`, collapses separator runs and trims separators at the
    /// ends. Collisions with existing ids are resolved by the registry, not
    /// here.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnusableName` if nothing survives
    /// sanitization, or `ProfileError::ReservedName` for reserved ids.
    pub fn from_display_name(name: &str) -> Result<Self, ProfileError> {
        let mut slug = String::with_capacity(name.len());
        for ch in name.trim().to_lowercase().chars() {
            if ch.is_whitespace() {
                slug.push('-');
            } else if is_id_char(ch) {
                slug.push(ch);
            }
        }

        // Collapse separator runs and trim them from the ends.
        let mut collapsed = String::with_capacity(slug.len());
        let mut last_sep = true;
        for ch in slug.chars() {
            let sep = ch == '-' || ch == '_';
            if sep && last_sep {
                continue;
            }
            collapsed.push(ch);
            last_sep = sep;
        }
        while collapsed.ends_with(['-', '_']) {
            collapsed.pop();
        }

        collapsed.truncate(PROFILE_NAME_MAX);

        if collapsed.is_empty() {
            return Err(ProfileError::UnusableName);
        }
        if RESERVED_IDS.contains(&collapsed.as_str()) {
            return Err(ProfileError::ReservedName(collapsed));
        }
        Ok(Self(collapsed))
    }

    /// The id with a numeric collision suffix appended.
    #[must_use]
    pub fn with_suffix(&self, n: u32) -> Self {
        Self(format!("{}-{n}", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_'
}

impl fmt::Debug for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProfileId({})", self.0)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProfileId {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// One isolated namespace of user data, one per studied language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    display_name: String,
    created_at: DateTime<Utc>,
    last_used: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile with a validated display name.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NameLength` if the trimmed name is empty or
    /// longer than `PROFILE_NAME_MAX` characters.
    pub fn new(
        id: ProfileId,
        display_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        let display_name = validate_display_name(display_name.into())?;
        Ok(Self {
            id,
            display_name,
            created_at,
            last_used: created_at,
        })
    }

    /// Rebuilds a profile from persisted fields without re-validating the
    /// name, so old documents with out-of-bounds names still load.
    #[must_use]
    pub fn from_persisted(
        id: ProfileId,
        display_name: String,
        created_at: DateTime<Utc>,
        last_used: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            display_name,
            created_at,
            last_used,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn last_used(&self) -> DateTime<Utc> {
        self.last_used
    }

    /// Changes the display name; the id never changes.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NameLength` on an out-of-bounds name.
    pub fn rename(&mut self, new_name: impl Into<String>) -> Result<(), ProfileError> {
        self.display_name = validate_display_name(new_name.into())?;
        Ok(())
    }

    /// Marks the profile as used now.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used = now;
    }
}

fn validate_display_name(name: String) -> Result<String, ProfileError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if !(PROFILE_NAME_MIN..=PROFILE_NAME_MAX).contains(&len) {
        return Err(ProfileError::NameLength);
    }
    Ok(trimmed.to_string())
}

//
// ─── REGISTRY ──────────────────────────────────────────────────────────────────
//

/// The profile list plus the active profile id.
///
/// Invariants enforced here: at most `MAX_PROFILES` entries, unique ids, the
/// active profile always refers to an existing entry, and neither the active
/// nor the default profile can be removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRegistry {
    active: ProfileId,
    profiles: Vec<Profile>,
}

impl ProfileRegistry {
    /// A fresh registry holding only the default profile.
    ///
    /// # Panics
    ///
    /// Never panics: the built-in default name is within bounds.
    #[must_use]
    pub fn bootstrap(now: DateTime<Utc>) -> Self {
        let default = Profile::new(ProfileId::default_profile(), "Default", now)
            .expect("built-in default profile is valid");
        Self {
            active: ProfileId::default_profile(),
            profiles: vec![default],
        }
    }

    /// Rebuilds a registry from persisted parts, repairing a dangling
    /// active id by falling back to the first profile (or the default).
    #[must_use]
    pub fn from_persisted(active: ProfileId, profiles: Vec<Profile>, now: DateTime<Utc>) -> Self {
        let mut registry = if profiles.is_empty() {
            Self::bootstrap(now)
        } else {
            Self {
                active,
                profiles,
            }
        };
        let active_exists = registry.profiles.iter().any(|p| p.id() == &registry.active);
        if !active_exists {
            registry.active = registry.profiles[0].id().clone();
        }
        registry
    }

    #[must_use]
    pub fn active(&self) -> &ProfileId {
        &self.active
    }

    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProfileId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves a collision-free id for a new profile derived from `base`.
    #[must_use]
    pub fn next_free_id(&self, base: &ProfileId) -> ProfileId {
        if !self.contains(base) {
            return base.clone();
        }
        let mut n = 1;
        loop {
            let candidate = base.with_suffix(n);
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Adds a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::LimitReached` at the cap or
    /// `ProfileError::DuplicateId` if the id is taken.
    pub fn add(&mut self, profile: Profile) -> Result<(), ProfileError> {
        if self.profiles.len() >= MAX_PROFILES {
            return Err(ProfileError::LimitReached);
        }
        if self.contains(profile.id()) {
            return Err(ProfileError::DuplicateId(profile.id().clone()));
        }
        self.profiles.push(profile);
        Ok(())
    }

    /// Removes a profile and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DeleteActive` / `DeleteDefault` for the protected profiles
    /// and `UnknownProfile` if the id is not registered.
    pub fn remove(&mut self, id: &ProfileId) -> Result<Profile, ProfileError> {
        if id == &self.active {
            return Err(ProfileError::DeleteActive);
        }
        if id.is_default() {
            return Err(ProfileError::DeleteDefault);
        }
        let index = self
            .profiles
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| ProfileError::UnknownProfile(id.clone()))?;
        Ok(self.profiles.remove(index))
    }

    /// Switches the active profile and bumps its `last_used` stamp.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnknownProfile` if the id is not registered.
    pub fn set_active(&mut self, id: &ProfileId, now: DateTime<Utc>) -> Result<(), ProfileError> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| ProfileError::UnknownProfile(id.clone()))?;
        profile.touch(now);
        self.active = id.clone();
        Ok(())
    }

    /// Renames a profile's display name in place.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProfile` for a missing id or `NameLength` for an
    /// out-of-bounds name.
    pub fn rename(
        &mut self,
        id: &ProfileId,
        new_name: impl Into<String>,
    ) -> Result<(), ProfileError> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| ProfileError::UnknownProfile(id.clone()))?;
        profile.rename(new_name)
    }

    /// Re-creates the default profile if it went missing.
    ///
    /// Returns true if a repair was made.
    pub fn ensure_default(&mut self, now: DateTime<Utc>) -> bool {
        if self.contains(&ProfileId::default_profile()) {
            return false;
        }
        let default = Profile::new(ProfileId::default_profile(), "Default", now)
            .expect("built-in default profile is valid");
        self.profiles.insert(0, default);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn registry() -> ProfileRegistry {
        ProfileRegistry::bootstrap(fixed_now())
    }

    #[test]
    fn slug_derivation_lowercases_and_separates() {
        let id = ProfileId::from_display_name("Spanish").unwrap();
        assert_eq!(id.as_str(), "spanish");

        let id = ProfileId::from_display_name("  Brazilian  Portuguese ").unwrap();
        assert_eq!(id.as_str(), "brazilian-portuguese");

        let id = ProfileId::from_display_name("日本語 (N2)").unwrap();
        assert_eq!(id.as_str(), "n2");
    }

    #[test]
    fn slug_derivation_rejects_unusable_and_reserved() {
        assert_eq!(
            ProfileId::from_display_name("???").unwrap_err(),
            ProfileError::UnusableName
        );
        assert_eq!(
            ProfileId::from_display_name("Settings").unwrap_err(),
            ProfileError::ReservedName("settings".into())
        );
        assert_eq!(
            ProfileId::from_display_name("Default").unwrap_err(),
            ProfileError::ReservedName("default".into())
        );
    }

    #[test]
    fn profile_id_new_validates_charset() {
        assert!(ProfileId::new("spanish-1").is_ok());
        assert!(ProfileId::new("Spanish").is_err());
        assert!(ProfileId::new("a/b").is_err());
        assert!(ProfileId::new("").is_err());
    }

    #[test]
    fn display_name_bounds() {
        let id = ProfileId::default_profile();
        assert!(Profile::new(id.clone(), "", fixed_now()).is_err());
        assert!(Profile::new(id.clone(), "   ", fixed_now()).is_err());
        assert!(Profile::new(id.clone(), "a".repeat(31), fixed_now()).is_err());
        assert!(Profile::new(id, "a".repeat(30), fixed_now()).is_ok());
    }

    #[test]
    fn rename_changes_name_not_id() {
        let mut profile =
            Profile::new(ProfileId::new("spanish").unwrap(), "Spanish", fixed_now()).unwrap();
        profile.rename("Castellano").unwrap();
        assert_eq!(profile.display_name(), "Castellano");
        assert_eq!(profile.id().as_str(), "spanish");
    }

    #[test]
    fn bootstrap_has_active_default() {
        let registry = registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.active().is_default());
    }

    #[test]
    fn next_free_id_appends_numeric_suffix() {
        let mut registry = registry();
        let base = ProfileId::from_display_name("Spanish").unwrap();

        let first = registry.next_free_id(&base);
        assert_eq!(first.as_str(), "spanish");
        registry
            .add(Profile::new(first, "Spanish", fixed_now()).unwrap())
            .unwrap();

        let second = registry.next_free_id(&base);
        assert_eq!(second.as_str(), "spanish-1");
        registry
            .add(Profile::new(second, "Spanish", fixed_now()).unwrap())
            .unwrap();

        assert_eq!(registry.next_free_id(&base).as_str(), "spanish-2");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn add_enforces_cap() {
        let mut registry = registry();
        for i in 1..MAX_PROFILES {
            let id = ProfileId::new(format!("p{i}")).unwrap();
            registry
                .add(Profile::new(id, format!("P{i}"), fixed_now()).unwrap())
                .unwrap();
        }
        assert_eq!(registry.len(), MAX_PROFILES);

        let overflow = Profile::new(ProfileId::new("overflow").unwrap(), "X", fixed_now()).unwrap();
        assert_eq!(registry.add(overflow).unwrap_err(), ProfileError::LimitReached);
        assert_eq!(registry.len(), MAX_PROFILES);
    }

    #[test]
    fn remove_protects_active_and_default() {
        let mut registry = registry();
        let spanish = ProfileId::new("spanish").unwrap();
        registry
            .add(Profile::new(spanish.clone(), "Spanish", fixed_now()).unwrap())
            .unwrap();

        assert_eq!(
            registry.remove(&ProfileId::default_profile()).unwrap_err(),
            ProfileError::DeleteActive
        );

        registry.set_active(&spanish, fixed_now()).unwrap();
        assert_eq!(
            registry.remove(&ProfileId::default_profile()).unwrap_err(),
            ProfileError::DeleteDefault
        );
        assert_eq!(
            registry.remove(&spanish).unwrap_err(),
            ProfileError::DeleteActive
        );
    }

    #[test]
    fn remove_deletes_exactly_one_profile() {
        let mut registry = registry();
        let spanish = ProfileId::new("spanish").unwrap();
        registry
            .add(Profile::new(spanish.clone(), "Spanish", fixed_now()).unwrap())
            .unwrap();

        let removed = registry.remove(&spanish).unwrap();
        assert_eq!(removed.id(), &spanish);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.remove(&spanish).unwrap_err(),
            ProfileError::UnknownProfile(spanish)
        );
    }

    #[test]
    fn set_active_requires_known_id_and_touches() {
        let mut registry = registry();
        let ghost = ProfileId::new("ghost").unwrap();
        assert!(registry.set_active(&ghost, fixed_now()).is_err());

        let spanish = ProfileId::new("spanish").unwrap();
        registry
            .add(Profile::new(spanish.clone(), "Spanish", fixed_now()).unwrap())
            .unwrap();
        let later = fixed_now() + chrono::Duration::days(2);
        registry.set_active(&spanish, later).unwrap();
        assert_eq!(registry.active(), &spanish);
        assert_eq!(registry.get(&spanish).unwrap().last_used(), later);
    }

    #[test]
    fn from_persisted_repairs_dangling_active() {
        let spanish = Profile::new(ProfileId::new("spanish").unwrap(), "Spanish", fixed_now())
            .unwrap();
        let registry = ProfileRegistry::from_persisted(
            ProfileId::new("ghost").unwrap(),
            vec![spanish],
            fixed_now(),
        );
        assert_eq!(registry.active().as_str(), "spanish");

        let registry =
            ProfileRegistry::from_persisted(ProfileId::new("ghost").unwrap(), vec![], fixed_now());
        assert!(registry.active().is_default());
    }
}
