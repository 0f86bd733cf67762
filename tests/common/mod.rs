//! Helpers shared by the integration tests.

#![allow(dead_code)]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a test-writer subscriber filtered by `RUST_LOG`
/// (default `warn,propflow=debug`).
///
/// Only the first call in a test binary installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,propflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
