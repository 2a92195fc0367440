use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "app__header",
            h1 { "Task Manager" }
            p { "Keep track of what needs doing" }
        }
    }
}
