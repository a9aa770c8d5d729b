//! Subscriber setup for TyTo binaries.
//!
//! Log lines go to stderr so stdout stays free for search results. `RUST_LOG`
//! overrides the default directive.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the subscriber at `info`. See [`init_with_filter`].
pub fn init() -> bool {
    init_with_filter("info")
}

/// Install the subscriber, using `default_filter` when `RUST_LOG` is unset or
/// invalid.
///
/// Returns false if a global subscriber was already installed; the existing
/// one is left in place.
pub fn init_with_filter(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok()
}
