//! Headless autocomplete: the widget state machine wired to a real debounce
//! timer, a search backend, and the page's pointer events.
//!
//! [`Autocomplete`] is what a non-reactive front end (or a test) drives. State
//! lives in a `tokio::sync::watch` channel so renderers can
//! [`subscribe`](Autocomplete::subscribe) and redraw after every mutation.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::api::MealSearch;
use crate::debounce::Debouncer;
use crate::pointer::{PointerHub, PointerSubscription};
use crate::types::{AutocompleteConfig, NavKey, PointerTarget};
use crate::widget::{AutocompleteState, FetchPlan, KeyOutcome, SearchRequest};

struct Shared<S> {
    state: watch::Sender<AutocompleteState>,
    debouncer: Mutex<Debouncer>,
    search: Arc<S>,
}

impl<S: MealSearch> Shared<S> {
    fn update<R>(&self, f: impl FnOnce(&mut AutocompleteState) -> R) -> R {
        let mut out = None;
        self.state.send_modify(|state| out = Some(f(state)));
        out.expect("send_modify runs the closure exactly once")
    }

    /// Restart the debounce timer for the current query.
    fn schedule_commit(self: &Arc<Self>) {
        let query = self.state.borrow().query().to_string();
        let weak: Weak<Self> = Arc::downgrade(self);
        self.debouncer.lock().schedule(move || {
            if let Some(shared) = weak.upgrade() {
                shared.commit(query);
            }
        });
    }

    fn commit(self: &Arc<Self>, query: String) {
        match self.update(|state| state.commit_debounced(query)) {
            FetchPlan::Fetch(request) => self.spawn_fetch(request),
            FetchPlan::Cleared => debug!("Query cleared, suggestions emptied"),
            FetchPlan::Unchanged => {}
        }
    }

    fn spawn_fetch(self: &Arc<Self>, request: SearchRequest) {
        debug!(seq = request.seq, query = request.query.as_str(), "Fetching suggestions");
        let search = self.search.clone();
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            let result = search.search(&request.query).await;
            if let Some(shared) = weak.upgrade() {
                shared.update(|state| state.apply_results(request.seq, result));
            }
        });
    }

    fn pointer_down(self: &Arc<Self>, target: PointerTarget) {
        if self.update(|state| state.on_pointer_down(target)) {
            self.schedule_commit();
        }
    }
}

/// A mounted autocomplete widget. Dropping it cancels the pending debounce
/// timer and detaches its pointer listener. In-flight searches run to
/// completion but their results go nowhere.
pub struct Autocomplete<S: MealSearch> {
    shared: Arc<Shared<S>>,
    pointer: Option<PointerSubscription>,
}

impl<S: MealSearch> Autocomplete<S> {
    /// Create the widget. Must be called inside a tokio runtime before any
    /// input is fed to it.
    pub fn new(search: S, config: &AutocompleteConfig) -> Self {
        let (state, _) = watch::channel(AutocompleteState::new());
        let shared = Arc::new(Shared {
            state,
            debouncer: Mutex::new(Debouncer::new(config.debounce())),
            search: Arc::new(search),
        });
        Self { shared, pointer: None }
    }

    /// Listen for page-wide pointer-downs on `hub`. Mounting again replaces
    /// the previous subscription rather than adding a second one.
    pub fn mount(&mut self, hub: &PointerHub) {
        let weak = Arc::downgrade(&self.shared);
        self.pointer = Some(hub.subscribe(move |target| {
            if let Some(shared) = weak.upgrade() {
                shared.pointer_down(target);
            }
        }));
    }

    pub fn unmount(&mut self) {
        self.pointer = None;
        self.shared.debouncer.lock().cancel();
    }

    pub fn is_mounted(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn type_text(&self, text: impl Into<String>) {
        let text = text.into();
        if self.shared.update(|state| state.on_change(text)) {
            self.shared.schedule_commit();
        }
    }

    pub fn focus(&self) {
        self.shared.update(AutocompleteState::on_focus);
    }

    pub fn key(&self, key: NavKey) -> KeyOutcome {
        let outcome = self.shared.update(|state| state.on_key(key));
        if outcome.committed.is_some() {
            self.shared.schedule_commit();
        }
        outcome
    }

    /// Click the dropdown row at `index`.
    pub fn click(&self, index: usize) -> Option<String> {
        let name = self.shared.update(|state| state.select(index))?;
        self.shared.schedule_commit();
        Some(name)
    }

    /// Deliver a pointer-down directly, bypassing any hub.
    pub fn pointer_down(&self, target: PointerTarget) {
        self.shared.pointer_down(target);
    }

    pub fn snapshot(&self) -> AutocompleteState {
        self.shared.state.borrow().clone()
    }

    /// Receive every state change, for redrawing.
    pub fn subscribe(&self) -> watch::Receiver<AutocompleteState> {
        self.shared.state.subscribe()
    }

    pub fn has_pending_commit(&self) -> bool {
        self.shared.debouncer.lock().is_pending()
    }
}
