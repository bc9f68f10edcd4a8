//! Shared error types for the services crate.
//!
//! Each service has its own enum in the transparent-wrapper style: model
//! validation errors and storage errors pass through unchanged, while
//! operation-level rejections (archived month, unknown resource) get their
//! own variants.

use thiserror::Error;

use lingua_core::model::{
    DailyPlanError, GoalError, MonthId, ProfileError, RadarError, ResourceError, ResourceId,
    SettingsError,
};
use storage::StorageError;

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TrackerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GoalsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GoalsServiceError {
    #[error("month {0} is archived and read-only")]
    MonthArchived(MonthId),
    #[error(transparent)]
    Goal(#[from] GoalError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResourceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResourceServiceError {
    #[error("resource {0} does not exist")]
    UnknownResource(ResourceId),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RadarService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RadarServiceError {
    #[error(transparent)]
    Radar(#[from] RadarError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DailyPlanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DailyPlanServiceError {
    #[error(transparent)]
    Plan(#[from] DailyPlanError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Profile(#[from] ProfileServiceError),
    #[error(transparent)]
    Goals(#[from] GoalsServiceError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
    #[error(transparent)]
    DailyPlan(#[from] DailyPlanServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
