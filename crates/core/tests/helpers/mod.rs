//! Test harness for autocomplete integration tests.
//!
//! Builds an `Autocomplete` over a stub search backend that serves canned
//! TheMealDB bodies with configurable latency and records every query it
//! receives. Tests run on a paused tokio clock, so sleeps are instant and
//! deterministic.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mealfinder_core::api::parse_meals;
use mealfinder_core::error::FetchError;
use mealfinder_core::types::{AutocompleteConfig, Suggestion};
use mealfinder_core::{Autocomplete, MealSearch};

pub const NO_MEALS: &str = r#"{"meals":null}"#;

pub const CHICKEN: &str = r#"{"meals":[
    {"idMeal":"1","strMeal":"Chicken Curry","strCategory":"Chicken","strArea":"Indian"},
    {"idMeal":"2","strMeal":"Chicken Soup","strCategory":"Chicken","strArea":"British"}
]}"#;

#[derive(Clone)]
enum Canned {
    Body(&'static str),
    Status(u16),
}

#[derive(Clone, Default)]
pub struct StubSearch {
    responses: HashMap<String, (Duration, Canned)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `query` after `latency`.
    pub fn with_body(mut self, query: &str, latency: Duration, body: &'static str) -> Self {
        self.responses.insert(query.to_string(), (latency, Canned::Body(body)));
        self
    }

    /// Fail `query` with an HTTP status.
    pub fn with_status(mut self, query: &str, status: u16) -> Self {
        self.responses.insert(query.to_string(), (Duration::ZERO, Canned::Status(status)));
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }
}

impl MealSearch for StubSearch {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Suggestion>, FetchError>> + Send {
        self.calls.lock().unwrap().push(query.to_string());
        let (latency, canned) =
            self.responses.get(query).cloned().unwrap_or((Duration::ZERO, Canned::Body(NO_MEALS)));
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            match canned {
                Canned::Body(body) => parse_meals(body),
                Canned::Status(code) => Err(FetchError::Status(code)),
            }
        }
    }
}

pub struct TestHarness {
    pub widget: Autocomplete<StubSearch>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl TestHarness {
    pub fn new(search: StubSearch) -> Self {
        let calls = search.calls();
        let widget = Autocomplete::new(search, &AutocompleteConfig::default());
        TestHarness { widget, calls }
    }

    /// Type `text` one character at a time, `gap` apart.
    pub async fn type_slowly(&self, text: &str, gap: Duration) {
        let mut typed = String::new();
        for c in text.chars() {
            typed.push(c);
            self.widget.type_text(typed.clone());
            tokio::time::sleep(gap).await;
        }
    }

    /// Let the debounce timer and any zero-latency fetch complete.
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(301)).await;
        tokio::task::yield_now().await;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.widget.snapshot().suggestions().iter().map(|s| s.name.clone()).collect()
    }
}
