use dioxus::prelude::*;

/// Load state for a view backed by a `use_resource` future.
///
/// Errors carry the human-readable message that is rendered inline;
/// service errors already read well (`Display`), so views map them with
/// `to_string`.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(String),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, String>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(message)) => ViewState::Error(message.clone()),
            None => ViewState::Error("Something went wrong. Please try again.".to_string()),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Loading,
    }
}
