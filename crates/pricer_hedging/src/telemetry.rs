//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global fmt subscriber filtered at `level`.
///
/// `RUST_LOG` takes precedence over `level` when set. Returns `false` when
/// a global subscriber was already installed, leaving it in place.
///
/// # Examples
/// ```
/// use pricer_hedging::telemetry::init_tracing;
///
/// init_tracing("info");
/// assert!(!init_tracing("debug"));
/// ```
pub fn init_tracing(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
