//! Root application component: page shell around the search box.

use dioxus::prelude::*;

use mealfinder_core::pointer::PointerHub;
use mealfinder_core::types::PointerTarget;

use crate::search::SearchPanel;
use crate::INITIAL_STATE;

static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    let core = use_hook(|| INITIAL_STATE.lock().ok().and_then(|mut slot| slot.take()));

    // Page-wide pointer-downs. Widget parts stop propagation and report
    // themselves, so anything reaching the shell landed outside.
    let hub = use_hook(PointerHub::new);
    use_context_provider(|| hub.clone());

    let body = match core {
        Some(core) => rsx! { SearchPanel { core } },
        None => rsx! {
            div { class: "startup-error", "Search is unavailable." }
        },
    };

    rsx! {
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",
            onmousedown: move |_| {
                hub.dispatch(PointerTarget::Elsewhere);
            },

            h1 { class: "app-title", "Mealfinder" }

            {body}
        }
    }
}
