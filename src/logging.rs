//! Tracing subscriber setup.
//!
//! Events go to stderr so command output on stdout stays pipeable. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "stockdash=info,tower_http=info";
pub const VERBOSE_FILTER: &str = "stockdash=debug,tower_http=debug";

pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
