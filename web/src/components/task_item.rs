use chrono::Utc;
use dioxus::prelude::*;
use taskman_core::{Task, TaskStatus};

/// One row of the task list: completion checkbox, title, badges, actions.
#[component]
pub fn TaskItem(
    task: Task,
    on_toggle: EventHandler<Task>,
    on_edit: EventHandler<Task>,
    on_delete: EventHandler<u32>,
) -> Element {
    let completed = task.status == TaskStatus::Completed;
    let overdue = task.is_overdue(Utc::now());
    let item_class = if completed {
        "task-item task-item--completed"
    } else {
        "task-item"
    };
    let due_label = task
        .due_date
        .map(|due| format!("Due {}", due.format("%Y-%m-%d")));
    let due_class = if overdue { "badge badge--danger" } else { "badge" };

    let toggle_task = task.clone();
    let edit_task = task.clone();
    let task_id = task.id;

    rsx! {
        li { class: "{item_class}",
            input {
                r#type: "checkbox",
                class: "task-item__toggle",
                checked: completed,
                onchange: move |_| on_toggle.call(toggle_task.clone()),
            }
            div { class: "task-item__body",
                h3 { class: "task-item__title", "{task.title}" }
                if !task.description.is_empty() {
                    p { class: "task-item__description", "{task.description}" }
                }
                div { class: "task-item__meta",
                    span { class: "badge badge--{task.priority}", "{task.priority}" }
                    if let Some(label) = due_label {
                        span { class: "{due_class}", "{label}" }
                    }
                }
            }
            div { class: "task-item__actions",
                button {
                    class: "btn btn--ghost",
                    onclick: move |_| on_edit.call(edit_task.clone()),
                    "Edit"
                }
                button {
                    class: "btn btn--danger",
                    onclick: move |_| on_delete.call(task_id),
                    "Delete"
                }
            }
        }
    }
}
