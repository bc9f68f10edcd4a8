use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    DashboardView, GoalsView, PlanView, RadarView, ResourcesView, SettingsView, TrackerView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/tracker", TrackerView)] Tracker {},
        #[route("/goals", GoalsView)] Goals {},
        #[route("/resources", ResourcesView)] Resources {},
        #[route("/radar", RadarView)] Radar {},
        #[route("/plan", PlanView)] Plan {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Lingua" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Tracker {}, "Tracker" } }
                li { Link { to: Route::Goals {}, "Goals" } }
                li { Link { to: Route::Resources {}, "Resources" } }
                li { Link { to: Route::Radar {}, "Radar" } }
                li { Link { to: Route::Plan {}, "Daily Plan" } }
                li { Link { to: Route::Settings {}, "Settings" } }
            }
        }
    }
}
