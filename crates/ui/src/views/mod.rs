mod dashboard;
mod goals;
mod plan;
mod radar;
mod resources;
mod settings;
mod state;
mod tracker;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use goals::GoalsView;
pub use plan::PlanView;
pub use radar::RadarView;
pub use resources::ResourcesView;
pub use settings::SettingsView;
pub use state::{ViewState, view_state_from_resource};
pub use tracker::TrackerView;
