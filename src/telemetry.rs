//! Log output for hosts embedding the trainer.
//!
//! `LOG_LEVEL` takes an `EnvFilter` directive string and falls back to
//! [`DEFAULT_FILTER`]. `LOG_FORMAT=json` switches to one JSON object per line.
//! Events are emitted under three targets: `challenge` for rounds, `progress`
//! for the store and achievements, `bytewise` for startup and config.
//! Per-second ticks are traced at `trace` and stay hidden by default.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,challenge=debug,progress=debug,bytewise=debug";

fn wants_json() -> bool {
    std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    // A host may already own the global subscriber.
    let installed = if wants_json() {
        subscriber.json().with_current_span(true).try_init()
    } else {
        subscriber.compact().try_init()
    };
    if installed.is_ok() {
        tracing::debug!(target: "bytewise", json = wants_json(), "Tracing installed");
    }
}
