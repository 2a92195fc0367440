use dioxus::prelude::*;
use taskman_core::Task;

use crate::api::{self, StatusPatch, TaskPayload};
use crate::components::{ErrorMessage, FilterBar, Header, LoadingSpinner, TaskForm, TaskList};
use crate::filter::TaskFilters;

/// The single page of the app: a form panel next to the filterable list.
#[component]
pub fn Home() -> Element {
    let mut tasks = use_signal(Vec::<Task>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut selected = use_signal(|| None::<Task>);
    let filters = use_signal(TaskFilters::default);

    // Load the task list on mount.
    use_effect(move || {
        spawn(async move {
            match api::get_tasks().await {
                Ok(fetched) => {
                    tasks.set(fetched);
                    loading.set(false);
                }
                Err(err) => {
                    tracing::error!("Loading tasks failed: {err}");
                    error.set(Some(format!("Failed to load tasks: {err}")));
                    loading.set(false);
                }
            }
        });
    });

    // Creates a new task or saves the one being edited, depending on the
    // current selection.
    let handle_submit = move |payload: TaskPayload| {
        let editing = selected();
        spawn(async move {
            let result = match &editing {
                Some(task) => api::update_task(task.id, &payload).await,
                None => api::create_task(&payload).await,
            };
            match result {
                Ok(saved) => {
                    error.set(None);
                    let mut list = tasks();
                    match list.iter_mut().find(|task| task.id == saved.id) {
                        Some(slot) => *slot = saved,
                        None => list.insert(0, saved),
                    }
                    tasks.set(list);
                    selected.set(None);
                }
                Err(err) => {
                    tracing::error!("Saving task failed: {err}");
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let handle_toggle = move |task: Task| {
        spawn(async move {
            let patch = StatusPatch {
                status: task.status.toggled(),
            };
            match api::update_task(task.id, &patch).await {
                Ok(saved) => {
                    error.set(None);
                    let mut list = tasks();
                    if let Some(slot) = list.iter_mut().find(|task| task.id == saved.id) {
                        *slot = saved;
                    }
                    tasks.set(list);
                }
                Err(err) => {
                    tracing::error!("Toggling task status failed: {err}");
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let handle_delete = move |id: u32| {
        spawn(async move {
            match api::delete_task(id).await {
                Ok(confirmation) => {
                    error.set(None);
                    let mut list = tasks();
                    list.retain(|task| task.id != confirmation.id);
                    tasks.set(list);
                    // Dropping the task under edit clears the form too.
                    if selected().is_some_and(|task| task.id == confirmation.id) {
                        selected.set(None);
                    }
                }
                Err(err) => {
                    tracing::error!("Deleting task failed: {err}");
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let handle_edit = move |task: Task| selected.set(Some(task));
    let handle_cancel = move |_| selected.set(None);

    let visible = filters().apply(&tasks());
    // Re-keying the form resets its fields whenever the selection changes.
    let form_key = selected()
        .map(|task| task.id.to_string())
        .unwrap_or_else(|| "new-task".to_string());

    rsx! {
        Header {}
        main { class: "app__content",
            section { class: "app__panel",
                TaskForm {
                    key: "{form_key}",
                    initial: selected(),
                    on_submit: handle_submit,
                    on_cancel: handle_cancel,
                }
            }
            section { class: "app__panel",
                FilterBar { filters }
                if let Some(message) = error() {
                    ErrorMessage { message }
                }
                if loading() {
                    LoadingSpinner { message: "Loading tasks...".to_string() }
                } else {
                    TaskList {
                        tasks: visible,
                        on_toggle: handle_toggle,
                        on_edit: handle_edit,
                        on_delete: handle_delete,
                    }
                }
            }
        }
    }
}
