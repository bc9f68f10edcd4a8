use dioxus::prelude::*;
use dioxus_router::Router;

use lingua_core::model::{ProfileId, Settings, Theme};

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // The live active-profile id. Every view keys its loads on this
    // signal; a profile switch writes it and the whole UI reloads scoped
    // to the new id.
    use_context_provider(|| Signal::new(ctx.initial_profile().clone()));

    // The live settings record, so theme and font size take effect the
    // moment they are saved. `Theme::System` leaves the stylesheet's
    // prefers-color-scheme handling in charge.
    let initial_settings = ctx.settings().load().unwrap_or_default();
    let settings = use_context_provider(|| Signal::new(initial_settings));

    let root_class = match settings().theme() {
        Theme::Light => "app-root theme-light",
        Theme::Dark => "app-root theme-dark",
        Theme::System => "app-root",
    };
    let font_size = settings().font_size();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-view headings render in the pane.
        document::Title { "Lingua" }

        div { class: "{root_class}", style: "font-size: {font_size}px;",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

/// The active-profile signal provided by `App` (and the test harness).
#[must_use]
pub fn use_active_profile() -> Signal<ProfileId> {
    use_context::<Signal<ProfileId>>()
}

/// The live settings signal provided by `App` (and the test harness).
#[must_use]
pub fn use_app_settings() -> Signal<Settings> {
    use_context::<Signal<Settings>>()
}
