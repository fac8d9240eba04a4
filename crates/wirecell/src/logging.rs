//! Log output for the front end.
//!
//! The core logs through the `log` facade; those records are bridged into a
//! `tracing` subscriber writing to stderr, so that stdout stays free for
//! dumped documents.
use std::error::Error;

use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use wirecell_core::kernel::constants::{DEFAULT_LOG_FILTER, LOG_ENV};

/// Install the global subscriber. The filter comes from `WIRECELL_LOG`.
pub fn init(json: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(registry.with(layer))?;
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(registry.with(layer))?;
    }

    LogTracer::init()?;
    Ok(())
}
