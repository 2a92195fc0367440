mod api;
mod components;
mod filter;
mod views;

use dioxus::prelude::*;

use crate::views::Home;

fn main() {
    dioxus::launch(App);
}

static CSS: Asset = asset!("/assets/main.css");

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        Home {}
    }
}
