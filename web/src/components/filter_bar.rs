use dioxus::prelude::*;

use crate::filter::{StatusFilter, TaskFilters};

const STATUS_CHIPS: [(&str, &str); 3] = [
    ("all", "All"),
    ("pending", "Pending"),
    ("completed", "Completed"),
];

/// Search box plus status chips. Writes straight into the shared filter
/// signal owned by the page.
#[component]
pub fn FilterBar(mut filters: Signal<TaskFilters>) -> Element {
    let current = filters();

    rsx! {
        div { class: "filter-bar",
            input {
                r#type: "search",
                class: "filter-bar__search",
                placeholder: "Search tasks...",
                value: "{current.search}",
                oninput: move |event| filters.write().search = event.value(),
            }
            div { class: "filter-bar__statuses",
                for (value, label) in STATUS_CHIPS {
                    button {
                        class: if current.status.value() == value {
                            "btn btn--chip btn--chip-active"
                        } else {
                            "btn btn--chip"
                        },
                        onclick: move |_| filters.write().status = StatusFilter::from_value(value),
                        "{label}"
                    }
                }
            }
        }
    }
}
