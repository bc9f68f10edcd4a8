use chrono::NaiveDate;
use dioxus::prelude::*;

use lingua_core::model::{MonthStats, Skill, TrackerLog};

use crate::app::use_active_profile;
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{format_day_number, format_month, month_grid};

#[derive(Clone, Debug, PartialEq)]
struct TrackerData {
    log: TrackerLog,
    stats: MonthStats,
}

fn skill_initial(skill: Skill) -> &'static str {
    match skill {
        Skill::Reading => "R",
        Skill::Listening => "L",
        Skill::Speaking => "S",
        Skill::Writing => "W",
    }
}

#[component]
pub fn TrackerView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile = use_active_profile();
    let today = ctx.clock().today();
    let mut month = use_signal(|| ctx.clock().current_month());
    let mut error = use_signal(|| None::<String>);

    let resource_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        let profile_id = profile();
        let month = month();
        async move {
            let log = ctx
                .tracker()
                .log(&profile_id)
                .map_err(|err| err.to_string())?;
            let stats = log.month_stats(month);
            Ok::<_, String>(TrackerData { log, stats })
        }
    });
    let state = view_state_from_resource(&resource);

    let toggle_ctx = ctx.clone();
    let on_toggle = use_callback(move |(date, skill): (NaiveDate, Skill)| {
        match toggle_ctx.tracker().toggle(&profile(), date, skill) {
            Ok(_) => error.set(None),
            Err(err) => error.set(Some(err.to_string())),
        }
        resource.restart();
    });

    rsx! {
        div { class: "page",
            h2 { "Daily Tracker" }

            div { class: "month-nav",
                button { onclick: move |_| month.set(month().prev()), "‹" }
                span { class: "month-label", "{format_month(month())}" }
                button { onclick: move |_| month.set(month().next()), "›" }
            }

            if let Some(message) = error() {
                p { class: "inline-error", "{message}" }
            }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    table { class: "tracker-grid",
                        thead {
                            tr {
                                for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
                                    th { "{name}" }
                                }
                            }
                        }
                        tbody {
                            for week in month_grid(month()) {
                                tr {
                                    for cell in week {
                                        match cell {
                                            Some(date) => rsx! {
                                                td {
                                                    class: if date == today { "day today" } else { "day" },
                                                    div { class: "day-number", "{format_day_number(date)}" }
                                                    div { class: "day-skills",
                                                        for skill in Skill::ALL {
                                                            button {
                                                                class: if *data.log.day(date).get(skill) { "skill-dot done" } else { "skill-dot" },
                                                                title: "{skill.label()}",
                                                                onclick: move |_| on_toggle.call((date, skill)),
                                                                "{skill_initial(skill)}"
                                                            }
                                                        }
                                                    }
                                                }
                                            },
                                            None => rsx! {
                                                td { class: "day empty" }
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div { class: "card month-stats",
                        h3 { "This month" }
                        p { "Active days: {data.stats.active_days} / {data.stats.days_in_month}" }
                        p { "Longest streak: {data.stats.longest_streak} days" }
                        ul {
                            for skill in Skill::ALL {
                                li { "{skill.label()}: {data.stats.per_skill_percent.get(skill)}%" }
                            }
                        }
                    }
                },
                ViewState::Error(message) => rsx! {
                    p { class: "inline-error", "{message}" }
                },
            }
        }
    }
}
