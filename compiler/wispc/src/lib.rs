//! Wisp command-line host.
//!
//! Thin layer over [`wisp_eval::Interpreter`]: reads scripts, bakes the
//! sample extensions on request and reports script errors on stderr.

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber if `RUST_LOG` is set.
///
/// Enable with `RUST_LOG=wisp_eval=debug` (label calls, bakes, snapshots)
/// or `RUST_LOG=wisp_eval=trace` (operator splits, literal probes).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
