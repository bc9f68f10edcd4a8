mod daily_plan;
mod goals;
mod ids;
mod month;
mod profile;
mod radar;
mod resource;
mod settings;
mod skill;
mod tracker;

pub use ids::{ParseResourceIdError, ResourceId};
pub use month::{MonthError, MonthId};
pub use skill::{Skill, SkillMap};

pub use daily_plan::{DailyPlan, DailyPlanError, PLAN_SLOTS};
pub use goals::{
    GOAL_SLOTS, GoalCategory, GoalError, GoalSlot, MonthlyGoals, Subtask,
};
pub use profile::{
    MAX_PROFILES, PROFILE_NAME_MAX, PROFILE_NAME_MIN, Profile, ProfileError, ProfileId,
    ProfileRegistry,
};
pub use radar::{
    RATING_MAX, RATING_MIN, RadarError, RadarSnapshot, Trend, balance_index, trends,
};
pub use resource::{Resource, ResourceDraft, ResourceError, ResourceKind, ResourceStatus};
pub use settings::{
    FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, Settings, SettingsDraft, SettingsError, Theme,
};
pub use tracker::{MonthStats, TrackerLog};
