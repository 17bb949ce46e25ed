// src/logging.rs
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

pub const SERVER_FILTER: &str = "info,tower_http=debug";
pub const CLI_FILTER: &str = "warn";

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init<W>(default_filter: &str, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .init();
}
