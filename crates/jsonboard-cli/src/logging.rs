use std::sync::Once;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

static INIT: Once = Once::new();

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Either a simple level like "info" or a full EnvFilter string
    /// e.g. "info,jsonboard_app=debug".
    pub level: Option<String>,
    /// Emit logs as JSON lines when true; otherwise plain text.
    pub json: bool,
}

/// Install the global subscriber once. Logs go to stderr so stdout stays machine-readable.
///
/// `--log-level` wins over `RUST_LOG`; without either only warnings and errors are shown.
pub fn init(cfg: &Config) {
    INIT.call_once(|| {
        let filter = match &cfg.level {
            Some(level) => EnvFilter::try_new(level).ok(),
            None => EnvFilter::try_from_default_env().ok(),
        }
        .unwrap_or_else(|| EnvFilter::new("warn"));

        let fmt_layer = if cfg.json {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .boxed()
        };

        let subscriber = Registry::default().with(filter).with(fmt_layer);
        // A subscriber installed by an embedding process stays in place.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
