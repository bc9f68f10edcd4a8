use std::sync::Arc;

use lingua_core::model::ProfileId;
use storage::Storage;

use crate::Clock;
use crate::daily_plan_service::DailyPlanService;
use crate::error::AppServicesError;
use crate::goals_service::GoalsService;
use crate::profile_service::ProfileService;
use crate::radar_service::RadarService;
use crate::resource_service::ResourceService;
use crate::settings_service::SettingsService;
use crate::tracker_service::TrackerService;

/// Assembles app-facing services and resolves the active profile.
///
/// Construction runs the startup routine: bootstrap/repair the profile
/// registry, sweep orphaned profile directories, and flag elapsed goal
/// months as archived for the active profile.
#[derive(Clone)]
pub struct AppServices {
    active_profile: ProfileId,
    profiles: Arc<ProfileService>,
    tracker: Arc<TrackerService>,
    goals: Arc<GoalsService>,
    resources: Arc<ResourceService>,
    radar: Arc<RadarService>,
    daily_plan: Arc<DailyPlanService>,
    settings: Arc<SettingsService>,
}

impl AppServices {
    /// Build services on top of the given storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the startup routine fails.
    pub fn new(storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let profiles = Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles)));
        let active_profile = profiles.initialize()?;

        let goals = Arc::new(GoalsService::new(clock, Arc::clone(&storage.goals)));
        goals.auto_archive_past(&active_profile)?;

        let tracker = Arc::new(TrackerService::new(clock, Arc::clone(&storage.tracker)));
        let resources = Arc::new(ResourceService::new(Arc::clone(&storage.resources)));
        let radar = Arc::new(RadarService::new(clock, Arc::clone(&storage.radar)));
        let daily_plan = Arc::new(DailyPlanService::new(Arc::clone(&storage.daily_plan)));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));

        Ok(Self {
            active_profile,
            profiles,
            tracker,
            goals,
            resources,
            radar,
            daily_plan,
            settings,
        })
    }

    /// The profile resolved as active at startup. After a switch the UI
    /// re-reads the registry through `profiles()`.
    #[must_use]
    pub fn active_profile(&self) -> &ProfileId {
        &self.active_profile
    }

    /// Whether the main window should open on startup: the settings flag,
    /// with the legacy daily-plan flag honored as a fallback.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` on storage failures.
    pub fn startup_open_requested(&self) -> Result<bool, AppServicesError> {
        if self.settings.load()?.open_on_startup() {
            return Ok(true);
        }
        Ok(self.daily_plan.load(&self.active_profile)?.show_on_startup())
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn tracker(&self) -> Arc<TrackerService> {
        Arc::clone(&self.tracker)
    }

    #[must_use]
    pub fn goals(&self) -> Arc<GoalsService> {
        Arc::clone(&self.goals)
    }

    #[must_use]
    pub fn resources(&self) -> Arc<ResourceService> {
        Arc::clone(&self.resources)
    }

    #[must_use]
    pub fn radar(&self) -> Arc<RadarService> {
        Arc::clone(&self.radar)
    }

    #[must_use]
    pub fn daily_plan(&self) -> Arc<DailyPlanService> {
        Arc::clone(&self.daily_plan)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}
