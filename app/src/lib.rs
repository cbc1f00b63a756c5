//! Vaultline transfer wizard
//!
//! Wires the form logic to the simulated backend. Commands are plain async
//! functions over [`AppState`], shaped for a UI shell to invoke.

pub mod commands;
pub mod state;

pub use state::AppState;

use tracing_subscriber::EnvFilter;
use transfer_core::AppConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback` is used.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build application state from a config
pub fn build_state(config: AppConfig) -> Result<AppState, transfer_core::Error> {
    tracing::info!(
        seed = ?config.seed,
        submit_success_rate = config.mock_api.submit.success_rate,
        "Starting Vaultline"
    );
    AppState::new(config)
}
