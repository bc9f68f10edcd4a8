use dioxus::prelude::*;

use lingua_core::model::{GOAL_SLOTS, GoalCategory, MonthlyGoals};

use crate::app::use_active_profile;
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::format_month;

#[component]
pub fn GoalsView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile = use_active_profile();
    let mut month = use_signal(|| ctx.clock().current_month());
    let mut error = use_signal(|| None::<String>);
    let mut subtask_inputs = use_signal(|| vec![String::new(); GOAL_SLOTS]);

    let resource_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        let profile_id = profile();
        let month = month();
        async move {
            ctx.goals()
                .goals_for_month(&profile_id, month)
                .map_err(|err| err.to_string())
        }
    });
    let state = view_state_from_resource(&resource);

    // One mutation path for every edit: run it, surface the error inline,
    // reload.
    let apply_ctx = ctx.clone();
    let apply = use_callback(
        move |edit: Box<dyn FnOnce(&AppContext) -> Result<MonthlyGoals, String>>| {
            match edit(&apply_ctx) {
                Ok(_) => error.set(None),
                Err(message) => error.set(Some(message)),
            }
            resource.restart();
        },
    );

    rsx! {
        div { class: "page",
            h2 { "Monthly Goals" }

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
                ViewState::Ready(goals) => rsx! {
                    if goals.is_archived() {
                        p { class: "archived-banner",
                            "This month is archived and read-only."
                        }
                    }

                    for slot in 0..GOAL_SLOTS {
                        GoalSlotCard {
                            goals: goals.clone(),
                            slot,
                            archived: goals.is_archived(),
                            subtask_input: subtask_inputs()[slot].clone(),
                            on_subtask_input: move |(index, text): (usize, String)| {
                                let mut inputs = subtask_inputs();
                                inputs[index] = text;
                                subtask_inputs.set(inputs);
                            },
                            apply,
                        }
                    }

                    div { class: "card",
                        h3 { "Month notes" }
                        textarea {
                            class: "notes",
                            disabled: goals.is_archived(),
                            value: "{goals.notes()}",
                            onchange: move |evt: FormEvent| {
                                let notes = evt.value();
                                let p = profile();
                                let m = month();
                                apply.call(Box::new(move |ctx: &AppContext| {
                                    ctx.goals()
                                        .set_notes(&p, m, &notes)
                                        .map_err(|err| err.to_string())
                                }));
                            },
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

#[component]
fn GoalSlotCard(
    goals: MonthlyGoals,
    slot: usize,
    archived: bool,
    subtask_input: String,
    on_subtask_input: EventHandler<(usize, String)>,
    apply: Callback<Box<dyn FnOnce(&AppContext) -> Result<MonthlyGoals, String>>>,
) -> Element {
    let profile = use_active_profile();
    let month = goals.month();
    let slot_data = goals.slot(slot).cloned().unwrap_or_default();
    let slot_number = slot + 1;
    let pending_subtask = subtask_input.clone();

    let completed_label = slot_data
        .completed_at()
        .map(|at| at.format("%Y-%m-%d").to_string());

    rsx! {
        div { class: if slot_data.is_completed() { "card goal-slot done" } else { "card goal-slot" },
            div { class: "goal-header",
                input {
                    class: "goal-title",
                    r#type: "text",
                    placeholder: "Goal {slot_number}",
                    disabled: archived,
                    value: "{slot_data.title()}",
                    onchange: move |evt: FormEvent| {
                        let title = evt.value();
                        let p = profile();
                        apply.call(Box::new(move |ctx: &AppContext| {
                            ctx.goals()
                                .set_title(&p, month, slot, &title)
                                .map_err(|err| err.to_string())
                        }));
                    },
                }
                select {
                    disabled: archived,
                    onchange: move |evt: FormEvent| {
                        let category = GoalCategory::from_label(&evt.value());
                        let p = profile();
                        apply.call(Box::new(move |ctx: &AppContext| {
                            ctx.goals()
                                .set_category(&p, month, slot, category)
                                .map_err(|err| err.to_string())
                        }));
                    },
                    for category in GoalCategory::ALL {
                        option {
                            selected: category == slot_data.category(),
                            "{category.label()}"
                        }
                    }
                }
                label { class: "goal-done",
                    input {
                        r#type: "checkbox",
                        disabled: archived,
                        checked: slot_data.is_completed(),
                        onchange: move |evt: FormEvent| {
                            let completed = evt.checked();
                            let p = profile();
                            apply.call(Box::new(move |ctx: &AppContext| {
                                ctx.goals()
                                    .set_completed(&p, month, slot, completed)
                                    .map_err(|err| err.to_string())
                            }));
                        },
                    }
                    "Done"
                }
            }

            if let Some(when) = completed_label {
                p { class: "completed-at", "First completed {when}" }
            }

            ul { class: "subtasks",
                for (index, subtask) in slot_data.subtasks().iter().enumerate() {
                    li {
                        label {
                            input {
                                r#type: "checkbox",
                                disabled: archived,
                                checked: subtask.done,
                                onchange: move |evt: FormEvent| {
                                    let done = evt.checked();
                                    let p = profile();
                                    apply.call(Box::new(move |ctx: &AppContext| {
                                        ctx.goals()
                                            .set_subtask_done(&p, month, slot, index, done)
                                            .map_err(|err| err.to_string())
                                    }));
                                },
                            }
                            "{subtask.text}"
                        }
                        if !archived {
                            button {
                                class: "remove",
                                onclick: move |_| {
                                    let p = profile();
                                    apply.call(Box::new(move |ctx: &AppContext| {
                                        ctx.goals()
                                            .remove_subtask(&p, month, slot, index)
                                            .map_err(|err| err.to_string())
                                    }));
                                },
                                "×"
                            }
                        }
                    }
                }
            }

            if !archived {
                div { class: "subtask-add",
                    input {
                        r#type: "text",
                        placeholder: "Add a subtask",
                        value: "{subtask_input}",
                        oninput: move |evt: FormEvent| on_subtask_input.call((slot, evt.value())),
                    }
                    button {
                        onclick: move |_| {
                            let text = pending_subtask.clone();
                            if text.trim().is_empty() {
                                return;
                            }
                            on_subtask_input.call((slot, String::new()));
                            let p = profile();
                            apply.call(Box::new(move |ctx: &AppContext| {
                                ctx.goals()
                                    .add_subtask(&p, month, slot, &text)
                                    .map_err(|err| err.to_string())
                            }));
                        },
                        "Add"
                    }
                }
            }

            textarea {
                class: "reflection",
                placeholder: "Reflection",
                disabled: archived,
                value: "{slot_data.reflection()}",
                onchange: move |evt: FormEvent| {
                    let reflection = evt.value();
                    let p = profile();
                    apply.call(Box::new(move |ctx: &AppContext| {
                        ctx.goals()
                            .set_reflection(&p, month, slot, &reflection)
                            .map_err(|err| err.to_string())
                    }));
                },
            }
        }
    }
}
