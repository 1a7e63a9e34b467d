//! Diagnostic logging setup
//!
//! Log events go to stderr so they never mix with command output on stdout.
//! The level comes from `PHONEDIR_LOG` (EnvFilter syntax), then `--verbose`,
//! then the `log_level` config key, defaulting to `warn`.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding an EnvFilter directive
pub const LOG_ENV: &str = "PHONEDIR_LOG";

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool, configured_level: Option<&str>) {
    let fallback = if verbose {
        "debug"
    } else {
        configured_level.unwrap_or("warn")
    };

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
