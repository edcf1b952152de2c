// SPDX-License-Identifier: MIT OR Apache-2.0

//! stderr logging via tracing-subscriber

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "EMBER_SEARCH_LOG";

/// Install the global subscriber. Results go to stdout, so logs stay on stderr.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
