use thiserror::Error;

use crate::model::{
    DailyPlanError, GoalError, MonthError, ProfileError, RadarError, ResourceError, SettingsError,
};

/// Umbrella error for callers that don't care which model rejected the
/// input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Month(#[from] MonthError),
    #[error(transparent)]
    Goal(#[from] GoalError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Radar(#[from] RadarError),
    #[error(transparent)]
    DailyPlan(#[from] DailyPlanError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
