//! Meal search input with debounced suggestions.
//!
//! All decisions are made by [`AutocompleteState`]; this component forwards
//! DOM events into it, runs the debounce timer and searches as Dioxus tasks,
//! and renders [`DropdownView`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use mealfinder_core::pointer::PointerHub;
use mealfinder_core::types::{NavKey, PointerTarget};
use mealfinder_core::widget::FetchPlan;
use mealfinder_core::{AutocompleteState, DropdownView, MealDbClient, MealSearch};

use super::suggestion_list::{row_element_id, NoSuggestions, SuggestionList, SuggestionRow};
use crate::state::AppState;

/// The one pending debounce task, if any.
#[derive(Clone, Default)]
struct PendingCommit(Rc<Cell<Option<Task>>>);

impl PendingCommit {
    fn replace(&self, task: Task) {
        if let Some(previous) = self.0.replace(Some(task)) {
            previous.cancel();
        }
    }

    /// Forget the task without cancelling it; called by the task itself once it fires.
    fn clear(&self) {
        self.0.set(None);
    }

    fn cancel(&self) {
        if let Some(task) = self.0.take() {
            task.cancel();
        }
    }
}

/// Everything an event handler needs to mutate the widget and kick off
/// follow-up work.
#[derive(Clone)]
struct WidgetHandle {
    state: Signal<AutocompleteState>,
    pending: PendingCommit,
    client: MealDbClient,
    delay: Duration,
}

impl WidgetHandle {
    /// Restart the debounce timer for the current query.
    fn schedule_commit(&self) {
        let query = self.state.peek().query().to_string();
        let handle = self.clone();
        let task = spawn(async move {
            tokio::time::sleep(handle.delay).await;
            handle.pending.clear();
            handle.commit(query);
        });
        self.pending.replace(task);
    }

    fn commit(&self, query: String) {
        let mut state = self.state;
        let Ok(plan) = state.try_write().map(|mut s| s.commit_debounced(query)) else {
            return;
        };
        let FetchPlan::Fetch(request) = plan else {
            return;
        };
        tracing::debug!(seq = request.seq, query = request.query.as_str(), "Fetching suggestions");
        let client = self.client.clone();
        spawn(async move {
            let result = client.search(&request.query).await;
            if let Ok(mut s) = state.try_write() {
                s.apply_results(request.seq, result);
            }
        });
    }

    /// Apply a mutation and reschedule the debounce timer if it changed the query.
    fn update_query(&self, f: impl FnOnce(&mut AutocompleteState) -> bool) {
        let mut state = self.state;
        let changed = match state.try_write() {
            Ok(mut s) => f(&mut s),
            Err(_) => false,
        };
        if changed {
            self.schedule_commit();
        }
    }

    fn select(&self, index: usize) {
        self.update_query(|s| s.select(index).is_some());
    }
}

fn scroll_row_into_view(index: usize) {
    let id = row_element_id(index);
    let _ = document::eval(&format!(
        r#"document.getElementById("{id}")?.scrollIntoView({{ block: "nearest" }});"#
    ));
}

fn nav_key(key: &Key) -> NavKey {
    match key {
        Key::ArrowDown => NavKey::ArrowDown,
        Key::ArrowUp => NavKey::ArrowUp,
        Key::Enter => NavKey::Enter,
        _ => NavKey::Other,
    }
}

#[component]
pub fn MealAutocomplete(core: AppState) -> Element {
    let state = use_signal(AutocompleteState::new);
    let pending = use_hook(PendingCommit::default);
    let hub = use_context::<PointerHub>();

    let handle = WidgetHandle {
        state,
        pending: pending.clone(),
        client: core.client.clone(),
        delay: core.config.debounce(),
    };

    // One listener for the lifetime of this component; dropping the hook
    // value on unmount detaches it.
    let _pointer = use_hook(|| {
        let handle = handle.clone();
        Rc::new(hub.subscribe(move |target| {
            handle.update_query(|s| s.on_pointer_down(target));
        }))
    });
    use_drop(move || pending.cancel());

    let snapshot = state.read();
    let dropdown = match snapshot.view() {
        DropdownView::Hidden => rsx! {},
        DropdownView::Suggestions(rows) => {
            let rows: Vec<SuggestionRow> = rows.into_iter().map(SuggestionRow::from).collect();
            let select = handle.clone();
            let report = hub.clone();
            rsx! {
                SuggestionList {
                    rows,
                    on_select: move |index| select.select(index),
                    on_pointer_down: move |_| {
                        report.dispatch(PointerTarget::Dropdown);
                    },
                }
            }
        }
        DropdownView::NoSuggestions => {
            let report = hub.clone();
            rsx! {
                NoSuggestions {
                    on_pointer_down: move |_| {
                        report.dispatch(PointerTarget::Dropdown);
                    },
                }
            }
        }
    };

    rsx! {
        div {
            class: "autocomplete-container",

            input {
                class: "autocomplete-input",
                r#type: "text",
                placeholder: "{core.config.placeholder}",
                value: "{snapshot.query()}",
                onfocus: {
                    let handle = handle.clone();
                    move |_| {
                        let mut state = handle.state;
                        state.write().on_focus();
                    }
                },
                oninput: {
                    let handle = handle.clone();
                    move |e: Event<FormData>| {
                        let value = e.value();
                        handle.update_query(|s| s.on_change(value));
                    }
                },
                onkeydown: {
                    let handle = handle.clone();
                    move |e: Event<KeyboardData>| {
                        let mut state = handle.state;
                        let outcome = state.write().on_key(nav_key(&e.key()));
                        if outcome.prevent_default {
                            e.prevent_default();
                        }
                        if let Some(index) = outcome.scroll_to {
                            scroll_row_into_view(index);
                        }
                        if outcome.committed.is_some() {
                            handle.schedule_commit();
                        }
                    }
                },
                onmousedown: {
                    let hub = hub.clone();
                    move |e: Event<MouseData>| {
                        e.stop_propagation();
                        hub.dispatch(PointerTarget::Input);
                    }
                },
            }

            {dropdown}
        }
    }
}
