//! Autocomplete widget state machine.
//!
//! [`AutocompleteState`] owns every piece of widget state and exposes one
//! method per UI event. It never sleeps or performs I/O: methods that need
//! follow-up work (a debounce reschedule, a network request) say so in their
//! return value and the caller drives it. Both the Dioxus component and the
//! headless [`crate::controller::Autocomplete`] sit on top of this type.

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::types::{NavKey, PointerTarget, Suggestion};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What committing a debounced query asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// The debounced value did not change.
    Unchanged,
    /// The query was cleared; suggestions are already emptied.
    Cleared,
    /// Issue a search and hand the result back to [`AutocompleteState::apply_results`].
    Fetch(SearchRequest),
}

/// A search the caller must run. `seq` ties the response back to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

/// Result of a keypress on the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Suppress the browser default (caret move, page scroll, form submit).
    pub prevent_default: bool,
    /// Row that should be scrolled into view.
    pub scroll_to: Option<usize>,
    /// Name written into the input by an Enter commit.
    pub committed: Option<String>,
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// One rendered dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub index: usize,
    pub id: &'a str,
    pub name: &'a str,
    pub highlighted: bool,
}

/// What the dropdown area should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView<'a> {
    Hidden,
    Suggestions(Vec<RowView<'a>>),
    /// The user typed and the search came back empty.
    NoSuggestions,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AutocompleteState {
    query: String,
    debounced_query: String,
    suggestions: Vec<Suggestion>,
    dropdown_visible: bool,
    has_typed: bool,
    /// Always `None` or a valid index into `suggestions`.
    highlighted: Option<usize>,
    /// Sequence number of the newest search issued or invalidated.
    latest_request: u64,
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown_visible
    }

    pub fn has_typed(&self) -> bool {
        self.has_typed
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Highlight as a signed index, `-1` meaning no row.
    pub fn highlighted_index(&self) -> isize {
        self.highlighted.map_or(-1, |i| i as isize)
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Replace the query text. Returns `true` when the value changed and the
    /// debounce timer must be rescheduled.
    fn set_query(&mut self, text: String) -> bool {
        if self.query == text {
            return false;
        }
        self.query = text;
        true
    }

    // -- input ---------------------------------------------------------------

    /// Text input changed. Any string is accepted, including empty.
    pub fn on_change(&mut self, text: impl Into<String>) -> bool {
        self.has_typed = true;
        self.set_query(text.into())
    }

    /// Input gained focus: open the panel, but don't claim "no results" yet.
    pub fn on_focus(&mut self) {
        self.dropdown_visible = true;
        self.has_typed = false;
    }

    // -- fetching ------------------------------------------------------------

    /// The debounce timer fired with `query`.
    pub fn commit_debounced(&mut self, query: impl Into<String>) -> FetchPlan {
        let query = query.into();
        if query == self.debounced_query {
            return FetchPlan::Unchanged;
        }
        self.debounced_query = query;

        // Either branch supersedes whatever is still in flight.
        self.latest_request += 1;

        if self.debounced_query.is_empty() {
            self.replace_suggestions(Vec::new());
            self.dropdown_visible = false;
            return FetchPlan::Cleared;
        }

        self.dropdown_visible = true;
        FetchPlan::Fetch(SearchRequest { seq: self.latest_request, query: self.debounced_query.clone() })
    }

    /// Hand back the outcome of a search. Responses for anything but the
    /// newest request are dropped. Returns whether the result was applied.
    pub fn apply_results(&mut self, seq: u64, result: Result<Vec<Suggestion>, FetchError>) -> bool {
        if seq != self.latest_request {
            debug!(seq, latest = self.latest_request, "Discarding stale search response");
            return false;
        }
        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, query = self.debounced_query.as_str(), "Error fetching suggestions");
                Vec::new()
            }
        };
        self.replace_suggestions(suggestions);
        true
    }

    fn replace_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    // -- selection -----------------------------------------------------------

    /// Commit the row at `index` as if it were clicked. Returns the new query
    /// text, or `None` if the index is out of range.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let name = self.suggestions.get(index)?.name.clone();
        self.set_query(name.clone());
        self.dropdown_visible = false;
        self.highlighted = None;
        Some(name)
    }

    pub fn on_key(&mut self, key: NavKey) -> KeyOutcome {
        let len = self.suggestions.len();
        match key {
            NavKey::ArrowDown => {
                let next = match self.highlighted {
                    None if len > 0 => Some(0),
                    Some(i) if i + 1 < len => Some(i + 1),
                    current => current,
                };
                self.highlighted = next;
                KeyOutcome { prevent_default: true, scroll_to: next, committed: None }
            }
            NavKey::ArrowUp => {
                let next = match self.highlighted {
                    Some(i) if i > 0 => Some(i - 1),
                    current => current,
                };
                self.highlighted = next;
                KeyOutcome { prevent_default: true, scroll_to: next, committed: None }
            }
            NavKey::Enter => {
                let committed = match self.highlighted {
                    Some(i) => self.select(i),
                    None => None,
                };
                KeyOutcome { prevent_default: true, scroll_to: None, committed }
            }
            NavKey::Other => KeyOutcome::default(),
        }
    }

    // -- outside interaction -------------------------------------------------

    /// A pointer went down somewhere on the page. Returns `true` when the
    /// query changed and the debounce timer must be rescheduled.
    pub fn on_pointer_down(&mut self, target: PointerTarget) -> bool {
        if !target.is_outside() {
            return false;
        }
        self.dropdown_visible = false;
        self.highlighted = None;
        self.set_query(String::new())
    }

    // -- rendering -----------------------------------------------------------

    pub fn view(&self) -> DropdownView<'_> {
        if !self.dropdown_visible {
            return DropdownView::Hidden;
        }
        if self.suggestions.is_empty() {
            return if self.has_typed { DropdownView::NoSuggestions } else { DropdownView::Hidden };
        }
        let rows = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(index, s)| RowView {
                index,
                id: &s.id,
                name: &s.name,
                highlighted: self.highlighted == Some(index),
            })
            .collect();
        DropdownView::Suggestions(rows)
    }
}
