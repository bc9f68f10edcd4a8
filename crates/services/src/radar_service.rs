use std::collections::BTreeMap;
use std::sync::Arc;

use lingua_core::model::{
    MonthId, ProfileId, RadarSnapshot, SkillMap, Trend, trends,
};
use storage::repository::RadarRepository;

use crate::Clock;
use crate::error::RadarServiceError;

/// Everything a radar panel needs for one month: the snapshot (if any),
/// the previous month's snapshot, and the derived balance index and
/// per-skill trends. All derivations are recomputed here on every read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadarView {
    pub month: MonthId,
    pub snapshot: Option<RadarSnapshot>,
    pub previous: Option<RadarSnapshot>,
    pub balance_index: Option<u8>,
    pub trends: SkillMap<Trend>,
}

/// Monthly self-assessment snapshots.
#[derive(Clone)]
pub struct RadarService {
    clock: Clock,
    repo: Arc<dyn RadarRepository>,
}

impl RadarService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn RadarRepository>) -> Self {
        Self { clock, repo }
    }

    /// All snapshots for a profile, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RadarServiceError` on storage failures.
    pub fn snapshots(
        &self,
        profile: &ProfileId,
    ) -> Result<BTreeMap<MonthId, RadarSnapshot>, RadarServiceError> {
        Ok(self.repo.load_snapshots(profile)?)
    }

    /// Save (or overwrite) the snapshot for one month. Other months are
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `RadarServiceError` for out-of-range ratings or storage
    /// failures; a rejected rating never reaches disk.
    pub fn save(
        &self,
        profile: &ProfileId,
        month: MonthId,
        ratings: SkillMap<u8>,
    ) -> Result<RadarSnapshot, RadarServiceError> {
        let snapshot = RadarSnapshot::new(month, ratings)?;
        let mut all = self.repo.load_snapshots(profile)?;
        all.insert(month, snapshot);
        self.repo.save_snapshots(profile, &all)?;
        Ok(snapshot)
    }

    /// The radar panel data for one month.
    ///
    /// # Errors
    ///
    /// Returns `RadarServiceError` on storage failures.
    pub fn view(
        &self,
        profile: &ProfileId,
        month: MonthId,
    ) -> Result<RadarView, RadarServiceError> {
        let all = self.repo.load_snapshots(profile)?;
        let snapshot = all.get(&month).copied();
        let previous = all.get(&month.prev()).copied();
        let balance_index = snapshot.as_ref().map(RadarSnapshot::balance_index);
        let month_trends = snapshot
            .as_ref()
            .map(|current| trends(current, previous.as_ref()))
            .unwrap_or_default();
        Ok(RadarView {
            month,
            snapshot,
            previous,
            balance_index,
            trends: month_trends,
        })
    }

    /// Days since the most recent snapshot's month began, or `None` when
    /// no snapshot exists. Used for the "time for a new self-assessment?"
    /// nudge.
    ///
    /// # Errors
    ///
    /// Returns `RadarServiceError` on storage failures.
    pub fn days_since_last(
        &self,
        profile: &ProfileId,
    ) -> Result<Option<i64>, RadarServiceError> {
        let all = self.repo.load_snapshots(profile)?;
        let Some((last_month, _)) = all.iter().next_back() else {
            return Ok(None);
        };
        let elapsed = self
            .clock
            .today()
            .signed_duration_since(last_month.first_day())
            .num_days();
        Ok(Some(elapsed))
    }
}
