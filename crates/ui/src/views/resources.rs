use dioxus::prelude::*;

use lingua_core::model::{Resource, ResourceDraft, ResourceId, ResourceKind, ResourceStatus};

use crate::app::use_active_profile;
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};

/// Editable form state. Tags are edited as one comma-separated line.
#[derive(Clone, Debug, Default, PartialEq)]
struct ResourceForm {
    editing: Option<ResourceId>,
    title: String,
    kind: ResourceKind,
    url: String,
    status: ResourceStatus,
    notes: String,
    tags: String,
}

impl ResourceForm {
    fn from_resource(resource: &Resource) -> Self {
        let draft = resource.to_draft();
        Self {
            editing: Some(resource.id()),
            title: draft.title,
            kind: draft.kind,
            url: draft.url,
            status: draft.status,
            notes: draft.notes,
            tags: draft.tags.join(", "),
        }
    }

    fn to_draft(&self) -> ResourceDraft {
        ResourceDraft {
            title: self.title.clone(),
            kind: self.kind,
            url: self.url.clone(),
            status: self.status,
            notes: self.notes.clone(),
            tags: self
                .tags
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

#[component]
pub fn ResourcesView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile = use_active_profile();
    let mut form = use_signal(ResourceForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut status_filter = use_signal(|| None::<ResourceStatus>);
    let mut pending_delete = use_signal(|| None::<ResourceId>);

    let resource_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        let profile_id = profile();
        async move {
            ctx.resources()
                .list(&profile_id)
                .map_err(|err| err.to_string())
        }
    });
    let state = view_state_from_resource(&resource);

    let save_ctx = ctx.clone();
    let on_save = use_callback(move |()| {
        let current = form();
        let draft = current.to_draft();
        let result = match current.editing {
            Some(id) => save_ctx.resources().update(&profile(), id, draft),
            None => save_ctx.resources().add(&profile(), draft),
        };
        match result {
            Ok(_) => {
                form.set(ResourceForm::default());
                error.set(None);
                resource.restart();
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let delete_ctx = ctx.clone();
    let on_delete = use_callback(move |id: ResourceId| {
        // First click arms the deletion, second click confirms it.
        if pending_delete() != Some(id) {
            pending_delete.set(Some(id));
            return;
        }
        pending_delete.set(None);
        match delete_ctx.resources().remove(&profile(), id) {
            Ok(()) => {
                error.set(None);
                resource.restart();
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let form_value = form();
    let heading = if form_value.editing.is_some() {
        "Edit resource"
    } else {
        "Add a resource"
    };

    rsx! {
        div { class: "page",
            h2 { "Resources" }

            if let Some(message) = error() {
                p { class: "inline-error", "{message}" }
            }

            div { class: "card resource-form",
                h3 { "{heading}" }
                input {
                    r#type: "text",
                    placeholder: "Title",
                    value: "{form_value.title}",
                    oninput: move |evt: FormEvent| {
                        let mut next = form();
                        next.title = evt.value();
                        form.set(next);
                    },
                }
                select {
                    onchange: move |evt: FormEvent| {
                        let mut next = form();
                        next.kind = ResourceKind::from_label(&evt.value());
                        form.set(next);
                    },
                    for kind in ResourceKind::ALL {
                        option { selected: kind == form_value.kind, "{kind.label()}" }
                    }
                }
                input {
                    r#type: "text",
                    placeholder: "https://…",
                    value: "{form_value.url}",
                    oninput: move |evt: FormEvent| {
                        let mut next = form();
                        next.url = evt.value();
                        form.set(next);
                    },
                }
                select {
                    onchange: move |evt: FormEvent| {
                        let mut next = form();
                        next.status = ResourceStatus::from_label(&evt.value());
                        form.set(next);
                    },
                    for status in ResourceStatus::ALL {
                        option { selected: status == form_value.status, "{status.label()}" }
                    }
                }
                input {
                    r#type: "text",
                    placeholder: "Tags (comma-separated)",
                    value: "{form_value.tags}",
                    oninput: move |evt: FormEvent| {
                        let mut next = form();
                        next.tags = evt.value();
                        form.set(next);
                    },
                }
                textarea {
                    placeholder: "Notes",
                    value: "{form_value.notes}",
                    onchange: move |evt: FormEvent| {
                        let mut next = form();
                        next.notes = evt.value();
                        form.set(next);
                    },
                }
                div { class: "form-actions",
                    button { onclick: move |_| on_save.call(()), "Save" }
                    if form_value.editing.is_some() {
                        button {
                            onclick: move |_| {
                                form.set(ResourceForm::default());
                                error.set(None);
                            },
                            "Cancel"
                        }
                    }
                }
            }

            div { class: "filter-row",
                label { "Status: " }
                select {
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        if value == "All" {
                            status_filter.set(None);
                        } else {
                            status_filter.set(Some(ResourceStatus::from_label(&value)));
                        }
                    },
                    option { selected: status_filter().is_none(), "All" }
                    for status in ResourceStatus::ALL {
                        option { selected: status_filter() == Some(status), "{status.label()}" }
                    }
                }
            }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(resources) => rsx! {
                    if resources.is_empty() {
                        p { "No resources yet." }
                    } else {
                        table { class: "resource-table",
                            thead {
                                tr {
                                    th { "Title" }
                                    th { "Type" }
                                    th { "Status" }
                                    th { "Tags" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for item in resources
                                    .into_iter()
                                    .filter(|r| status_filter().is_none_or(|s| r.status() == s))
                                {
                                    ResourceRow {
                                        item: item.clone(),
                                        armed: pending_delete() == Some(item.id()),
                                        on_edit: move |resource: Resource| {
                                            form.set(ResourceForm::from_resource(&resource));
                                            error.set(None);
                                        },
                                        on_delete,
                                    }
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

#[component]
fn ResourceRow(
    item: Resource,
    armed: bool,
    on_edit: EventHandler<Resource>,
    on_delete: Callback<ResourceId>,
) -> Element {
    let id = item.id();
    let edit_copy = item.clone();
    let tags = item.tags().join(", ");

    rsx! {
        tr {
            td {
                "{item.title()}"
                if let Some(url) = item.url() {
                    " "
                    a { href: "{url}", target: "_blank", "open" }
                }
            }
            td { "{item.kind().label()}" }
            td { "{item.status().label()}" }
            td { "{tags}" }
            td { class: "row-actions",
                button { onclick: move |_| on_edit.call(edit_copy.clone()), "Edit" }
                button {
                    class: if armed { "danger armed" } else { "danger" },
                    onclick: move |_| on_delete.call(id),
                    if armed { "Confirm" } else { "Delete" }
                }
            }
        }
    }
}
