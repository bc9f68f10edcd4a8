#![forbid(unsafe_code)]

pub mod app_services;
pub mod daily_plan_service;
pub mod error;
pub mod goals_service;
pub mod profile_service;
pub mod radar_service;
pub mod resource_service;
pub mod settings_service;
pub mod tracker_service;

pub use lingua_core::Clock;

pub use app_services::AppServices;
pub use daily_plan_service::DailyPlanService;
pub use error::{
    AppServicesError, DailyPlanServiceError, GoalsServiceError, ProfileServiceError,
    RadarServiceError, ResourceServiceError, SettingsServiceError, TrackerServiceError,
};
pub use goals_service::GoalsService;
pub use profile_service::ProfileService;
pub use radar_service::{RadarService, RadarView};
pub use resource_service::ResourceService;
pub use settings_service::SettingsService;
pub use tracker_service::TrackerService;
