//! Application state shared with the search box.

use std::path::Path;

use mealfinder_core::error::FetchError;
use mealfinder_core::types::AutocompleteConfig;
use mealfinder_core::{load_config, MealDbClient};

/// Configuration plus the HTTP client built from it and created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AutocompleteConfig,
    pub client: MealDbClient,
}

impl AppState {
    /// Load `.mealfinder.toml` from the current working directory, if any.
    pub fn from_cwd() -> Result<Self, FetchError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
        Self::from_dir(&cwd)
    }

    pub fn from_dir(dir: &Path) -> Result<Self, FetchError> {
        let config = load_config(dir);
        let client = MealDbClient::new(&config)?;
        Ok(AppState { config, client })
    }
}

// The client is derived from the config, so comparing configs is enough.
impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}
