use dioxus::prelude::*;
use taskman_core::Task;

use crate::components::TaskItem;

#[component]
pub fn TaskList(
    tasks: Vec<Task>,
    on_toggle: EventHandler<Task>,
    on_edit: EventHandler<Task>,
    on_delete: EventHandler<u32>,
) -> Element {
    if tasks.is_empty() {
        return rsx! {
            p { class: "state state--empty", "No tasks match the current filters." }
        };
    }

    rsx! {
        ul { class: "task-list",
            for task in tasks {
                TaskItem {
                    key: "{task.id}",
                    task: task.clone(),
                    on_toggle,
                    on_edit,
                    on_delete,
                }
            }
        }
    }
}
