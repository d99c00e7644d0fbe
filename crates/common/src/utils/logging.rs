use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. `server` covers both the library's handlers
/// and the binary's lifecycle events, since they share that target.
pub const TEXT_DIRECTIVES: &str = "warn,common=info,models=info,server=info,service=info,tower_http=info";

/// JSON output is meant for log shippers, so store operations come through at debug.
pub const JSON_DIRECTIVES: &str = "warn,common=info,models=info,server=info,service=debug,tower_http=info";

fn filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber on stdout. `json` selects structured output
/// (`[logging] json = true`); otherwise compact single-line text.
///
/// A second call is a no-op, so tests and the binary can both call it.
pub fn init_logging(json: bool) {
    let builder = fmt().with_target(json).with_writer(io::stdout);
    let _ = if json {
        builder.with_env_filter(filter(JSON_DIRECTIVES)).json().try_init()
    } else {
        builder.with_env_filter(filter(TEXT_DIRECTIVES)).compact().try_init()
    };
}
