//! Core types shared across Mealfinder: widget configuration, suggestions,
//! TheMealDB wire types, and the framework-independent input events the
//! widget reacts to.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// TheMealDB name search endpoint. The query goes in the `s` parameter.
pub const DEFAULT_ENDPOINT: &str = "https://www.themealdb.com/api/json/v1/1/search.php";

/// Quiet period before a typed query is committed for searching.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

pub const DEFAULT_PLACEHOLDER: &str = "Search for meals...";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Text shown in place of the dropdown rows when a typed query matched nothing.
pub const NO_SUGGESTIONS_TEXT: &str = "No suggestions found";

/// Runtime configuration for the autocomplete widget. Loaded from
/// `.mealfinder.toml` or defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    /// Search endpoint; the query is appended as `?s=<query>`.
    pub endpoint: String,
    pub debounce_ms: u64,
    pub placeholder: String,
    /// Upper bound on a single search request, in seconds.
    pub request_timeout_secs: u64,
}

impl AutocompleteConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// A single selectable row in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: String,
    /// Display name; becomes the input value when the row is selected.
    pub name: String,
}

impl Suggestion {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// One entry of TheMealDB's `meals` array. Only the fields the widget shows
/// are decoded; the rest of the recipe payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Meal {
    #[serde(rename = "idMeal")]
    pub id_meal: String,
    #[serde(rename = "strMeal")]
    pub str_meal: String,
}

impl From<Meal> for Suggestion {
    fn from(meal: Meal) -> Self {
        Suggestion { id: meal.id_meal, name: meal.str_meal }
    }
}

/// Body of a `search.php` response. `meals` is `null` when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<Meal>>,
}

impl MealsResponse {
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.meals.unwrap_or_default().into_iter().map(Suggestion::from).collect()
    }
}

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// Keys the widget intercepts. Everything else is [`NavKey::Other`] and
/// falls through to ordinary text editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Other,
}

/// Where a pointer-down landed relative to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Input,
    Dropdown,
    Elsewhere,
}

impl PointerTarget {
    pub fn is_outside(self) -> bool {
        matches!(self, PointerTarget::Elsewhere)
    }
}
