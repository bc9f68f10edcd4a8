use dioxus::prelude::*;
use dioxus_router::use_navigator;

use lingua_core::model::{MonthStats, Skill};

use crate::app::use_active_profile;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::format_month;

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    profile_name: String,
    month_label: String,
    stats: MonthStats,
    streak: u32,
    goals_done: usize,
    balance: Option<u8>,
    plan_tasks: Vec<String>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile = use_active_profile();
    let navigator = use_navigator();

    // Honor the startup preference once: land on the daily plan.
    let launch_ctx = ctx.clone();
    use_effect(move || {
        if launch_ctx.take_show_plan_on_launch() {
            navigator.push(Route::Plan {});
        }
    });

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        let profile_id = profile();
        async move {
            let month = ctx.clock().current_month();
            let profile_name = ctx
                .profiles()
                .list()
                .map_err(|err| err.to_string())?
                .iter()
                .find(|p| p.id() == &profile_id)
                .map_or_else(|| profile_id.to_string(), |p| p.display_name().to_string());

            let stats = ctx
                .tracker()
                .month_stats(&profile_id, month)
                .map_err(|err| err.to_string())?;
            let streak = ctx
                .tracker()
                .current_streak(&profile_id)
                .map_err(|err| err.to_string())?;
            let goals_done = ctx
                .goals()
                .goals_for_month(&profile_id, month)
                .map_err(|err| err.to_string())?
                .completed_count();
            let balance = ctx
                .radar()
                .view(&profile_id, month)
                .map_err(|err| err.to_string())?
                .balance_index;
            let plan_tasks = ctx
                .daily_plan()
                .load(&profile_id)
                .map_err(|err| err.to_string())?
                .tasks()
                .iter()
                .filter(|t| !t.trim().is_empty())
                .cloned()
                .collect();

            Ok::<_, String>(DashboardData {
                profile_name,
                month_label: format_month(month),
                stats,
                streak,
                goals_done,
                balance,
                plan_tasks,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Dashboard" }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    p { class: "subtitle", "Profile: {data.profile_name} · {data.month_label}" }

                    div { class: "card-grid",
                        div { class: "card",
                            h3 { "Practice" }
                            p { "Active days: {data.stats.active_days} / {data.stats.days_in_month}" }
                            p { "Longest streak: {data.stats.longest_streak} days" }
                            p { "Current streak: {data.streak} days" }
                        }
                        div { class: "card",
                            h3 { "Skills this month" }
                            ul {
                                for skill in Skill::ALL {
                                    li { "{skill.label()}: {data.stats.per_skill_percent.get(skill)}%" }
                                }
                            }
                        }
                        div { class: "card",
                            h3 { "Goals" }
                            p { "{data.goals_done} of 3 completed" }
                        }
                        div { class: "card",
                            h3 { "Balance" }
                            match data.balance {
                                Some(index) => rsx! { p { "Balance index: {index} / 100" } },
                                None => rsx! { p { "No self-assessment yet this month." } },
                            }
                        }
                    }

                    div { class: "card",
                        h3 { "Today's plan" }
                        if data.plan_tasks.is_empty() {
                            p { "No tasks planned." }
                        } else {
                            ul {
                                for task in data.plan_tasks {
                                    li { "{task}" }
                                }
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
