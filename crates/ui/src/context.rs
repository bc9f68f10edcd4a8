use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use lingua_core::model::ProfileId;
use services::{
    Clock, DailyPlanService, GoalsService, ProfileService, RadarService, ResourceService,
    SettingsService, TrackerService,
};

/// What the composition root (the `app` crate, or a test harness) hands to
/// the UI.
pub trait UiApp: Send + Sync {
    fn active_profile(&self) -> ProfileId;
    fn show_plan_on_launch(&self) -> bool;
    fn clock(&self) -> Clock;

    fn profiles(&self) -> Arc<ProfileService>;
    fn tracker(&self) -> Arc<TrackerService>;
    fn goals(&self) -> Arc<GoalsService>;
    fn resources(&self) -> Arc<ResourceService>;
    fn radar(&self) -> Arc<RadarService>;
    fn daily_plan(&self) -> Arc<DailyPlanService>;
    fn settings(&self) -> Arc<SettingsService>;
}

/// Service handles plus the profile the app started in.
///
/// The *live* active profile is a `Signal<ProfileId>` provided by the root
/// component; every view keys its loads on that signal, so switching
/// profiles reloads everything and nothing is cached across the switch.
#[derive(Clone)]
pub struct AppContext {
    initial_profile: ProfileId,
    show_plan_on_launch_once: Arc<AtomicBool>,
    clock: Clock,

    profiles: Arc<ProfileService>,
    tracker: Arc<TrackerService>,
    goals: Arc<GoalsService>,
    resources: Arc<ResourceService>,
    radar: Arc<RadarService>,
    daily_plan: Arc<DailyPlanService>,
    settings: Arc<SettingsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_profile: app.active_profile(),
            show_plan_on_launch_once: Arc::new(AtomicBool::new(app.show_plan_on_launch())),
            clock: app.clock(),
            profiles: app.profiles(),
            tracker: app.tracker(),
            goals: app.goals(),
            resources: app.resources(),
            radar: app.radar(),
            daily_plan: app.daily_plan(),
            settings: app.settings(),
        }
    }

    #[must_use]
    pub fn initial_profile(&self) -> &ProfileId {
        &self.initial_profile
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// One-shot: true the first time it is read after launch if the
    /// startup-open preference asked for the plan popup.
    #[must_use]
    pub fn take_show_plan_on_launch(&self) -> bool {
        self.show_plan_on_launch_once.swap(false, Ordering::AcqRel)
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
