//! Logging and tracing initialization.

use crate::settings::LoggingConfig;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level. A second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Logs go to stderr; stdout carries the heatmap payload
    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
