//! Subscriber setup for hosts that want to see the parser's progress events.
//!
//! The library only emits `tracing` events under the `tagged_queries`
//! target; hosts with their own subscriber can ignore this module.

use tracing_subscriber::EnvFilter;

use crate::config::ParserConfig;

fn filter_from_config(config: &ParserConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.directive())
}

/// Install a compact stderr subscriber filtered to this crate's events.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(config: &ParserConfig) {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
