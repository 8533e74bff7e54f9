//! Tracing setup for embedding hosts
//!
//! The crate logs through `tracing`; hosts that already install a
//! subscriber need nothing from here. [`init`] is a convenience for demos
//! and standalone harnesses.
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=gridline::adapter=debug` - module-level filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize a console tracing subscriber
///
/// Respects RUST_LOG, defaulting to `warn`. Safe to call once per process;
/// a second call is ignored if a subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_filter(filter))
        .try_init();
}
