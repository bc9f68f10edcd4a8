use dioxus::prelude::*;

use lingua_core::model::{
    FONT_SIZE_MAX, FONT_SIZE_MIN, Profile, ProfileId, SettingsDraft, Theme,
};

use crate::app::{use_active_profile, use_app_settings};
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct SettingsData {
    draft: SettingsDraft,
    profiles: Vec<Profile>,
    active: ProfileId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saved,
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut profile = use_active_profile();

    let mut theme = use_signal(|| None::<Theme>);
    let mut font_size = use_signal(String::new);
    let mut open_on_startup = use_signal(|| None::<bool>);
    let mut save_state = use_signal(|| SaveState::Idle);
    let mut error = use_signal(|| None::<String>);

    let mut new_profile_name = use_signal(String::new);
    let mut rename_target = use_signal(|| None::<ProfileId>);
    let mut rename_value = use_signal(String::new);
    let mut profile_error = use_signal(|| None::<String>);

    let resource_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        // Depend on the signal so a profile switch reloads the list.
        let _ = profile();
        async move {
            let settings = ctx.settings().load().map_err(|err| err.to_string())?;
            let profiles = ctx.profiles().list().map_err(|err| err.to_string())?;
            let active = ctx.profiles().active().map_err(|err| err.to_string())?;
            Ok::<_, String>(SettingsData {
                draft: settings.to_draft(),
                profiles,
                active,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let mut live_settings = use_app_settings();
    let save_ctx = ctx.clone();
    let on_save = use_callback(move |current: SettingsDraft| {
        let parsed: Result<u8, _> = font_size().trim().parse();
        let Ok(size) = parsed else {
            error.set(Some(format!(
                "Font size must be a number between {FONT_SIZE_MIN} and {FONT_SIZE_MAX}."
            )));
            return;
        };
        let draft = SettingsDraft {
            theme: theme().unwrap_or(current.theme),
            font_size: size,
            open_on_startup: open_on_startup().unwrap_or(current.open_on_startup),
        };
        match save_ctx.settings().save(draft) {
            Ok(saved) => {
                live_settings.set(saved);
                error.set(None);
                save_state.set(SaveState::Saved);
                resource.restart();
            }
            Err(err) => {
                error.set(Some(err.to_string()));
                save_state.set(SaveState::Idle);
            }
        }
    });

    // Keep the font-size field seeded from the loaded draft.
    use_effect(move || {
        if let Some(Ok(data)) = resource.value().read().as_ref() {
            if font_size().is_empty() {
                font_size.set(data.draft.font_size.to_string());
            }
        }
    });

    let create_ctx = ctx.clone();
    let on_create_profile = use_callback(move |()| {
        match create_ctx.profiles().create(new_profile_name().trim()) {
            Ok(_) => {
                profile_error.set(None);
                new_profile_name.set(String::new());
                resource.restart();
            }
            Err(err) => profile_error.set(Some(err.to_string())),
        }
    });

    let switch_ctx = ctx.clone();
    let on_switch = use_callback(move |id: ProfileId| {
        match switch_ctx.profiles().set_active(&id) {
            Ok(()) => {
                profile_error.set(None);
                // Flipping the signal reloads every view for the new
                // profile.
                profile.set(id);
                resource.restart();
            }
            Err(err) => profile_error.set(Some(err.to_string())),
        }
    });

    let delete_ctx = ctx.clone();
    let on_delete = use_callback(move |id: ProfileId| {
        match delete_ctx.profiles().delete(&id) {
            Ok(()) => {
                profile_error.set(None);
                resource.restart();
            }
            Err(err) => profile_error.set(Some(err.to_string())),
        }
    });

    let rename_ctx = ctx.clone();
    let on_rename = use_callback(move |()| {
        let Some(id) = rename_target() else { return };
        match rename_ctx.profiles().rename(&id, rename_value().trim()) {
            Ok(()) => {
                profile_error.set(None);
                rename_target.set(None);
                rename_value.set(String::new());
                resource.restart();
            }
            Err(err) => profile_error.set(Some(err.to_string())),
        }
    });

    rsx! {
        div { class: "page",
            h2 { "Settings" }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "card settings-card",
                        h3 { "Appearance" }

                        if let Some(message) = error() {
                            p { class: "inline-error", "{message}" }
                        }
                        if save_state() == SaveState::Saved {
                            p { class: "saved-note", "Saved" }
                        }

                        div { class: "settings-row",
                            label { "Theme" }
                            select {
                                onchange: move |evt: FormEvent| {
                                    theme.set(Some(Theme::from_label(&evt.value())));
                                    save_state.set(SaveState::Idle);
                                },
                                for option_theme in Theme::ALL {
                                    option {
                                        selected: option_theme == theme().unwrap_or(data.draft.theme),
                                        "{option_theme.label()}"
                                    }
                                }
                            }
                        }

                        div { class: "settings-row",
                            label { "Font size ({FONT_SIZE_MIN}–{FONT_SIZE_MAX})" }
                            input {
                                r#type: "number",
                                min: "{FONT_SIZE_MIN}",
                                max: "{FONT_SIZE_MAX}",
                                value: "{font_size}",
                                oninput: move |evt: FormEvent| {
                                    font_size.set(evt.value());
                                    save_state.set(SaveState::Idle);
                                },
                            }
                        }

                        div { class: "settings-row",
                            label {
                                input {
                                    r#type: "checkbox",
                                    checked: open_on_startup().unwrap_or(data.draft.open_on_startup),
                                    onchange: move |evt: FormEvent| {
                                        open_on_startup.set(Some(evt.checked()));
                                        save_state.set(SaveState::Idle);
                                    },
                                }
                                "Open the daily plan on startup"
                            }
                        }

                        button {
                            class: "primary",
                            onclick: move |_| on_save.call(data.draft),
                            "Save settings"
                        }
                    }

                    div { class: "card profiles-card",
                        h3 { "Profiles" }

                        if let Some(message) = profile_error() {
                            p { class: "inline-error", "{message}" }
                        }

                        ul { class: "profile-list",
                            for entry in data.profiles.clone() {
                                ProfileRow {
                                    entry: entry.clone(),
                                    is_active: entry.id() == &data.active,
                                    renaming: rename_target() == Some(entry.id().clone()),
                                    rename_value: rename_value(),
                                    on_rename_input: move |value: String| rename_value.set(value),
                                    on_start_rename: move |(id, name): (ProfileId, String)| {
                                        rename_target.set(Some(id));
                                        rename_value.set(name);
                                    },
                                    on_rename,
                                    on_switch,
                                    on_delete,
                                }
                            }
                        }

                        div { class: "profile-add",
                            input {
                                r#type: "text",
                                placeholder: "New profile name (e.g. Spanish)",
                                value: "{new_profile_name}",
                                oninput: move |evt: FormEvent| new_profile_name.set(evt.value()),
                            }
                            button { onclick: move |_| on_create_profile.call(()), "Create" }
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
fn ProfileRow(
    entry: Profile,
    is_active: bool,
    renaming: bool,
    rename_value: String,
    on_rename_input: EventHandler<String>,
    on_start_rename: EventHandler<(ProfileId, String)>,
    on_rename: Callback<()>,
    on_switch: Callback<ProfileId>,
    on_delete: Callback<ProfileId>,
) -> Element {
    let id = entry.id().clone();
    let switch_id = id.clone();
    let delete_id = id.clone();
    let rename_id = id.clone();
    let display_name = entry.display_name().to_string();

    rsx! {
        li { class: if is_active { "profile-row active" } else { "profile-row" },
            if renaming {
                input {
                    r#type: "text",
                    value: "{rename_value}",
                    oninput: move |evt: FormEvent| on_rename_input.call(evt.value()),
                }
                button { onclick: move |_| on_rename.call(()), "Save" }
            } else {
                span { class: "profile-name", "{entry.display_name()}" }
                span { class: "profile-id", "({entry.id()})" }
                if is_active {
                    span { class: "badge", "active" }
                }
            }
            div { class: "row-actions",
                if !is_active {
                    button { onclick: move |_| on_switch.call(switch_id.clone()), "Switch" }
                }
                button {
                    onclick: move |_| on_start_rename.call((rename_id.clone(), display_name.clone())),
                    "Rename"
                }
                if !is_active && !entry.id().is_default() {
                    button {
                        class: "danger",
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
