use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_INIT: Once = Once::new();

/// Install the global tracing subscriber, once per process.
///
/// `RUST_LOG` takes precedence; `default_filter` is used when it is unset or
/// cannot be parsed. Later calls are no-ops, so every test can call this
/// first without coordinating with the others.
pub fn log_init(default_filter: &str) {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let format = tracing_subscriber::fmt::layer()
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_test_writer()
            .compact();

        // another subscriber may already be installed by the host test harness
        if tracing_subscriber::registry()
            .with(filter)
            .with(format)
            .try_init()
            .is_ok()
        {
            debug!("tracing initialized with default filter: {default_filter}");
        }
    });
}
