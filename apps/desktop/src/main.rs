//! Mealfinder Desktop: Dioxus-powered recipe search box.

use std::sync::Mutex;

use dioxus::prelude::*;

mod app;
mod search;
mod state;

use app::App;
use state::AppState;

/// Pre-runtime storage loaded before Dioxus launches, consumed on first render.
pub static INITIAL_STATE: Mutex<Option<AppState>> = Mutex::new(None);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mealfinder=info".parse().expect("valid log directive")),
        )
        .with_target(false)
        .init();

    let initial_state = match AppState::from_cwd() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to set up search client");
            std::process::exit(1);
        }
    };
    tracing::info!(
        endpoint = initial_state.config.endpoint.as_str(),
        debounce_ms = initial_state.config.debounce_ms,
        "Starting Mealfinder"
    );
    if let Ok(mut slot) = INITIAL_STATE.lock() {
        *slot = Some(initial_state);
    }

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_background_color((250, 247, 242, 255))
                    .with_disable_context_menu(true)
                    .with_window(
                        WindowBuilder::new()
                            .with_title("Mealfinder")
                            .with_inner_size(LogicalSize::new(720.0, 560.0))
                            .with_min_inner_size(LogicalSize::new(420.0, 320.0))
                            .with_resizable(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
