//! Tracing subscriber setup driven by the node configuration.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `level` seeds the default filter ("trace" … "error"); an explicit
/// `RUST_LOG` in the environment still takes precedence. `format` selects
/// the output shape: "json" for machine-readable logs, anything else for
/// human-readable output.
pub fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
