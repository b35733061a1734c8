//! Mealfinder: recipe search autocomplete.
//!
//! This crate holds everything about the search box that doesn't depend on a
//! UI toolkit: the widget state machine, the query debouncer, the TheMealDB
//! client, page-wide pointer subscriptions, and configuration loading.
//!
//! # Modules
//!
//! - [`widget`]: Autocomplete state machine and dropdown view model
//! - [`debounce`]: Cancellable delayed task for committing the query
//! - [`api`]: TheMealDB search client and the [`api::MealSearch`] seam
//! - [`pointer`]: Scoped pointer-down subscriptions for outside clicks
//! - [`controller`]: Headless widget driving all of the above on tokio
//! - [`types`]: Configuration, suggestions, wire types, input events
//! - [`error`]: Fetch and config error types

pub mod api;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod pointer;
pub mod types;
pub mod widget;

use std::path::Path;

use tracing::{debug, warn};

use error::ConfigError;
use types::AutocompleteConfig;

pub use api::{MealDbClient, MealSearch};
pub use controller::Autocomplete;
pub use widget::{AutocompleteState, DropdownView, KeyOutcome};

// ---------------------------------------------------------------------------
// .mealfinder.toml config loading
// ---------------------------------------------------------------------------

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".mealfinder.toml";

/// Known keys in `.mealfinder.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["endpoint", "debounce_ms", "placeholder", "request_timeout_secs"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn warn_unknown_keys(table: &toml::Table) {
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let closest = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match closest {
            Some(suggestion) if edit_distance(key, suggestion) <= 3 => warn!(
                key = key.as_str(),
                suggestion = *suggestion,
                "Unknown key in {CONFIG_FILE_NAME}, did you mean '{suggestion}'?"
            ),
            _ => warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            ),
        }
    }
}

fn non_negative_int(table: &toml::Table, key: &'static str) -> Result<Option<u64>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::Integer(n)) if *n >= 0 => Ok(Some(*n as u64)),
        Some(other) => Err(ConfigError::InvalidValue {
            key,
            reason: format!("expected a non-negative integer, got {other}"),
        }),
    }
}

fn string(table: &toml::Table, key: &'static str) -> Result<Option<String>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => {
            Err(ConfigError::InvalidValue { key, reason: format!("expected a string, got {other}") })
        }
    }
}

/// Parse config text, merging overrides onto the defaults.
pub fn parse_config(content: &str) -> Result<AutocompleteConfig, ConfigError> {
    let table = content.parse::<toml::Table>()?;
    warn_unknown_keys(&table);

    let mut config = AutocompleteConfig::default();
    if let Some(endpoint) = string(&table, "endpoint")? {
        config.endpoint = endpoint;
    }
    if let Some(placeholder) = string(&table, "placeholder")? {
        config.placeholder = placeholder;
    }
    if let Some(ms) = non_negative_int(&table, "debounce_ms")? {
        config.debounce_ms = ms;
    }
    if let Some(secs) = non_negative_int(&table, "request_timeout_secs")? {
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        config.request_timeout_secs = secs;
    }
    Ok(config)
}

/// Read `.mealfinder.toml` from `dir`. A missing file yields the defaults.
pub fn try_load_config(dir: &Path) -> Result<AutocompleteConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(AutocompleteConfig::default());
    }
    debug!(path = %path.display(), "Loading {CONFIG_FILE_NAME}");
    let content = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
    parse_config(&content)
}

/// Load widget configuration from `.mealfinder.toml` in `dir`.
///
/// Returns defaults merged with any overrides from the file. If the file
/// can't be read or contains invalid values, the problem is logged and the
/// defaults are returned.
pub fn load_config(dir: &Path) -> AutocompleteConfig {
    try_load_config(dir).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring {CONFIG_FILE_NAME}, using defaults");
        AutocompleteConfig::default()
    })
}
