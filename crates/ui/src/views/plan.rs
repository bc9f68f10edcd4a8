use dioxus::prelude::*;

use lingua_core::model::PLAN_SLOTS;

use crate::app::use_active_profile;
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};

fn slot_label(slot: usize) -> String {
    format!("{}.", slot + 1)
}

#[component]
pub fn PlanView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile = use_active_profile();
    let mut error = use_signal(|| None::<String>);

    let resource_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        let profile_id = profile();
        async move {
            ctx.daily_plan()
                .load(&profile_id)
                .map_err(|err| err.to_string())
        }
    });
    let state = view_state_from_resource(&resource);

    let save_ctx = ctx.clone();
    let on_save_task = use_callback(move |(slot, text): (usize, String)| {
        match save_ctx.daily_plan().set_task(&profile(), slot, &text) {
            Ok(_) => error.set(None),
            Err(err) => error.set(Some(err.to_string())),
        }
        resource.restart();
    });

    rsx! {
        div { class: "page",
            h2 { "Daily Plan" }
            p { class: "subtitle", "Four small things for today. Not tied to a date; edit any time." }

            if let Some(message) = error() {
                p { class: "inline-error", "{message}" }
            }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(plan) => rsx! {
                    div { class: "card plan-card",
                        for slot in 0..PLAN_SLOTS {
                            div { class: "plan-row",
                                span { class: "plan-index", "{slot_label(slot)}" }
                                input {
                                    r#type: "text",
                                    placeholder: "Task",
                                    value: "{plan.tasks()[slot]}",
                                    onchange: move |evt: FormEvent| {
                                        on_save_task.call((slot, evt.value()));
                                    },
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
