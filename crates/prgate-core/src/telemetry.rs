//! Tracing initialisation for prgate binaries.
//!
//! Call [`init_tracing`] once at program start to configure the global
//! subscriber. Diagnostics are written to stderr; stdout stays reserved
//! for the verdict output. Subsequent calls are silently ignored, since
//! the global subscriber can only be set once per process.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// * `json`: emit newline-delimited JSON log lines instead of the human
///   format. Useful when the gate runs inside a log-aggregating CI.
/// * `level`: default verbosity when `RUST_LOG` is not set.
///
/// The human format omits timestamps and targets; CI runners already
/// stamp every line. The JSON format keeps both fields. `RUST_LOG` takes
/// precedence over `level` for fine-grained filtering.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .ok();
    } else {
        registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}
