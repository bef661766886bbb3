//! Tracing initialization.

use std::{
    io::{self, IsTerminal},
    sync::Once,
};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `SCENECHECK_LOG=scenecheck=trace`.
pub const LOG_ENV: &str = "SCENECHECK_LOG";

static INIT: Once = Once::new();

/// Filter used when `SCENECHECK_LOG` is unset or invalid.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "scenecheck=debug"
    } else {
        "scenecheck=warn"
    }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(io::stderr().is_terminal())
                    .with_target(false)
                    .without_time(),
            )
            .with(filter)
            .try_init();
    });
}
