use dioxus::prelude::*;

/// An error message component for displaying error states
#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "alert alert--error",
            p { "{message}" }
        }
    }
}
