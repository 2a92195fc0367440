use dioxus::prelude::*;
use taskman_core::{Task, TaskPriority, TaskStatus};

use crate::api::TaskPayload;

/// Form for creating a task or editing the selected one. The parent keys
/// this component by the selection, so fields reseed whenever it changes.
#[component]
pub fn TaskForm(
    initial: Option<Task>,
    on_submit: EventHandler<TaskPayload>,
    on_cancel: EventHandler<()>,
) -> Element {
    let editing = initial.is_some();
    let seed_title = initial
        .as_ref()
        .map(|task| task.title.clone())
        .unwrap_or_default();
    let seed_description = initial
        .as_ref()
        .map(|task| task.description.clone())
        .unwrap_or_default();
    let seed_status = initial.as_ref().map(|task| task.status).unwrap_or_default();
    let seed_priority = initial
        .as_ref()
        .map(|task| task.priority)
        .unwrap_or_default();
    let seed_due_date = initial
        .as_ref()
        .and_then(|task| task.due_date)
        .map(|due| due.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    let mut title = use_signal(move || seed_title);
    let mut description = use_signal(move || seed_description);
    let mut status = use_signal(move || seed_status);
    let mut priority = use_signal(move || seed_priority);
    let mut due_date = use_signal(move || seed_due_date);
    let mut title_error = use_signal(|| None::<String>);

    let handle_submit = move |event: Event<FormData>| {
        event.prevent_default();
        let trimmed_title = title().trim().to_string();
        if trimmed_title.is_empty() {
            title_error.set(Some("Title is required".to_string()));
            return;
        }
        title_error.set(None);
        let raw_due = due_date();
        let raw_due = raw_due.trim();
        on_submit.call(TaskPayload {
            title: trimmed_title,
            description: description().trim().to_string(),
            status: status(),
            priority: priority(),
            due_date: (!raw_due.is_empty()).then(|| raw_due.to_string()),
        });
        // A successful edit clears through re-keying; only the create form
        // resets itself.
        if !editing {
            title.set(String::new());
            description.set(String::new());
            status.set(TaskStatus::default());
            priority.set(TaskPriority::default());
            due_date.set(String::new());
        }
    };

    rsx! {
        form { class: "task-form", onsubmit: handle_submit,
            h2 {
                if editing { "Edit task" } else { "Add a task" }
            }
            div { class: "form-field",
                label { r#for: "task-title", "Title" }
                input {
                    id: "task-title",
                    r#type: "text",
                    placeholder: "What needs doing?",
                    value: "{title}",
                    oninput: move |event| title.set(event.value()),
                }
                if let Some(message) = title_error() {
                    p { class: "form-field__error", "{message}" }
                }
            }
            div { class: "form-field",
                label { r#for: "task-description", "Description" }
                textarea {
                    id: "task-description",
                    placeholder: "Optional details",
                    value: "{description}",
                    oninput: move |event| description.set(event.value()),
                }
            }
            div { class: "task-form__row",
                div { class: "form-field",
                    label { r#for: "task-status", "Status" }
                    select {
                        id: "task-status",
                        value: "{status}",
                        onchange: move |event| {
                            if let Ok(parsed) = event.value().parse() {
                                status.set(parsed);
                            }
                        },
                        option { value: "pending", "Pending" }
                        option { value: "completed", "Completed" }
                    }
                }
                div { class: "form-field",
                    label { r#for: "task-priority", "Priority" }
                    select {
                        id: "task-priority",
                        value: "{priority}",
                        onchange: move |event| {
                            if let Ok(parsed) = event.value().parse() {
                                priority.set(parsed);
                            }
                        },
                        option { value: "low", "Low" }
                        option { value: "medium", "Medium" }
                        option { value: "high", "High" }
                    }
                }
                div { class: "form-field",
                    label { r#for: "task-due-date", "Due date" }
                    input {
                        id: "task-due-date",
                        r#type: "date",
                        value: "{due_date}",
                        oninput: move |event| due_date.set(event.value()),
                    }
                }
            }
            div { class: "task-form__actions",
                button { r#type: "submit", class: "btn btn--primary",
                    if editing { "Save changes" } else { "Add task" }
                }
                if editing {
                    button {
                        r#type: "button",
                        class: "btn btn--ghost",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
