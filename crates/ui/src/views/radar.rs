use dioxus::prelude::*;

use lingua_core::model::{RATING_MAX, RATING_MIN, Skill, SkillMap, balance_index};
use services::RadarView as RadarViewData;

use crate::app::use_active_profile;
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{axis_endpoint, format_month, ring_points, value_points};

const CHART_SIZE: f64 = 220.0;
const CHART_RADIUS: f64 = 80.0;

#[derive(Clone, Debug, PartialEq)]
struct RadarPageData {
    view: RadarViewData,
    days_since_last: Option<i64>,
}

#[component]
pub fn RadarView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile = use_active_profile();
    let mut month = use_signal(|| ctx.clock().current_month());
    let mut draft = use_signal(|| None::<SkillMap<u8>>);
    let mut error = use_signal(|| None::<String>);

    let resource_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        let profile_id = profile();
        let month = month();
        async move {
            let view = ctx
                .radar()
                .view(&profile_id, month)
                .map_err(|err| err.to_string())?;
            let days_since_last = ctx
                .radar()
                .days_since_last(&profile_id)
                .map_err(|err| err.to_string())?;
            Ok::<_, String>(RadarPageData {
                view,
                days_since_last,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let save_ctx = ctx.clone();
    let on_save = use_callback(move |ratings: SkillMap<u8>| {
        match save_ctx.radar().save(&profile(), month(), ratings) {
            Ok(_) => {
                error.set(None);
                draft.set(None);
                resource.restart();
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    rsx! {
        div { class: "page",
            h2 { "Skill Radar" }

            div { class: "month-nav",
                button {
                    onclick: move |_| {
                        month.set(month().prev());
                        draft.set(None);
                    },
                    "‹"
                }
                span { class: "month-label", "{format_month(month())}" }
                button {
                    onclick: move |_| {
                        month.set(month().next());
                        draft.set(None);
                    },
                    "›"
                }
            }

            if let Some(message) = error() {
                p { class: "inline-error", "{message}" }
            }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(days) = data.days_since_last {
                        p { class: "subtitle", "Last self-assessment started {days} days ago." }
                    } else {
                        p { class: "subtitle", "No self-assessments yet. Rate each skill and save your first snapshot." }
                    }
                    RadarPanel { data: data.view, draft, on_save }
                },
                ViewState::Error(message) => rsx! {
                    p { class: "inline-error", "{message}" }
                },
            }
        }
    }
}

#[component]
fn RadarPanel(
    data: RadarViewData,
    draft: Signal<Option<SkillMap<u8>>>,
    on_save: Callback<SkillMap<u8>>,
) -> Element {
    // What the selectors show: the unsaved draft, else the saved snapshot,
    // else a neutral middle rating.
    let saved = data.snapshot.map(|s| *s.ratings());
    let ratings = draft().or(saved).unwrap_or_else(|| SkillMap::splat(3));
    let dirty = draft().is_some_and(|d| Some(d) != saved);
    let preview_balance = balance_index(&ratings);

    let center = CHART_SIZE / 2.0;
    let value = value_points(center, center, CHART_RADIUS, &ratings);
    let rings: Vec<String> = (RATING_MIN..=RATING_MAX)
        .map(|level| ring_points(center, center, CHART_RADIUS, level))
        .collect();
    // Last month's shape as a faint reference outline.
    let ghost = data
        .previous
        .map(|previous| value_points(center, center, CHART_RADIUS, previous.ratings()));

    rsx! {
        div { class: "radar-layout",
            svg {
                class: "radar-chart",
                view_box: "0 0 {CHART_SIZE} {CHART_SIZE}",
                width: "{CHART_SIZE}",
                height: "{CHART_SIZE}",

                for ring in rings {
                    polygon { class: "radar-ring", points: "{ring}" }
                }
                for axis in 0..Skill::ALL.len() {
                    RadarAxis { axis, center }
                }
                if let Some(ghost) = ghost {
                    polygon { class: "radar-ghost", points: "{ghost}" }
                }
                polygon { class: "radar-value", points: "{value}" }
            }

            div { class: "radar-controls",
                for skill in Skill::ALL {
                    div { class: "rating-row",
                        span { class: "rating-label", "{skill.label()}" }
                        for value in RATING_MIN..=RATING_MAX {
                            RatingButton { skill, value, ratings, draft }
                        }
                        TrendBadge { data: data.clone(), skill }
                    }
                }

                p { class: "balance",
                    if dirty {
                        "Balance preview: {preview_balance} / 100 (unsaved)"
                    } else {
                        match data.balance_index {
                            Some(index) => rsx! { "Balance index: {index} / 100" },
                            None => rsx! { "No snapshot saved for this month." },
                        }
                    }
                }

                button {
                    class: "primary",
                    disabled: !dirty,
                    onclick: move |_| on_save.call(ratings),
                    "Save snapshot"
                }
            }
        }
    }
}

#[component]
fn RadarAxis(axis: usize, center: f64) -> Element {
    let (x, y) = axis_endpoint(center, center, CHART_RADIUS, axis);
    let label = Skill::ALL[axis].label();
    rsx! {
        line {
            class: "radar-axis",
            x1: "{center}",
            y1: "{center}",
            x2: "{x}",
            y2: "{y}",
        }
        text { class: "radar-label", x: "{x}", y: "{y}", "{label}" }
    }
}

#[component]
fn RatingButton(
    skill: Skill,
    value: u8,
    ratings: SkillMap<u8>,
    draft: Signal<Option<SkillMap<u8>>>,
) -> Element {
    let selected = *ratings.get(skill) == value;
    let mut draft = draft;
    rsx! {
        button {
            class: if selected { "rating selected" } else { "rating" },
            onclick: move |_| {
                let mut next = ratings;
                next.set(skill, value);
                draft.set(Some(next));
            },
            "{value}"
        }
    }
}

#[component]
fn TrendBadge(data: RadarViewData, skill: Skill) -> Element {
    // Trends only mean something once this month has a saved snapshot.
    if data.snapshot.is_none() {
        return rsx! {
            span { class: "trend none" }
        };
    }
    let trend = *data.trends.get(skill);
    rsx! {
        span { class: "trend", title: "{trend.label()}", "{trend.arrow()}" }
    }
}
