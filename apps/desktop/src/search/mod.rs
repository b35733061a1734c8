//! Search panel: the autocomplete input and its dropdown.

mod autocomplete;
mod suggestion_list;

use dioxus::prelude::*;

use crate::state::AppState;
use autocomplete::MealAutocomplete;

#[component]
pub fn SearchPanel(core: AppState) -> Element {
    rsx! {
        div {
            class: "search-panel",
            MealAutocomplete { core }
        }
    }
}
