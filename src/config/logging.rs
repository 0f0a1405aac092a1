//! Tracing subscriber initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::settings::LogSettings;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Logs go to stderr so command
/// output on stdout stays machine-readable. Calling this twice is harmless:
/// the second install attempt is ignored.
pub fn init_tracing(settings: &LogSettings) {
    let env_filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| settings.filter.clone()),
    );

    let result = if settings.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
