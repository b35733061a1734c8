//! Dropdown rows and the "no suggestions" panel.

use dioxus::prelude::*;
use mealfinder_core::types::NO_SUGGESTIONS_TEXT;
use mealfinder_core::widget::RowView;

/// Owned copy of a [`RowView`] so it can cross a component boundary.
#[derive(Clone, PartialEq)]
pub struct SuggestionRow {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub highlighted: bool,
}

impl From<RowView<'_>> for SuggestionRow {
    fn from(row: RowView<'_>) -> Self {
        SuggestionRow {
            index: row.index,
            id: row.id.to_string(),
            name: row.name.to_string(),
            highlighted: row.highlighted,
        }
    }
}

/// DOM id of a row, used to scroll it into view.
pub fn row_element_id(index: usize) -> String {
    format!("meal-suggestion-{index}")
}

#[component]
pub fn SuggestionList(
    rows: Vec<SuggestionRow>,
    on_select: EventHandler<usize>,
    on_pointer_down: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "dropdown",
            onmousedown: move |e: Event<MouseData>| {
                e.stop_propagation();
                on_pointer_down.call(());
            },
            for row in rows {
                div {
                    key: "{row.id}",
                    id: row_element_id(row.index),
                    class: if row.highlighted { "dropdown-item highlighted" } else { "dropdown-item" },
                    onclick: move |_| on_select.call(row.index),
                    "{row.name}"
                }
            }
        }
    }
}

#[component]
pub fn NoSuggestions(on_pointer_down: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "dropdown no-suggestions",
            onmousedown: move |e: Event<MouseData>| {
                e.stop_propagation();
                on_pointer_down.call(());
            },
            "{NO_SUGGESTIONS_TEXT}"
        }
    }
}
