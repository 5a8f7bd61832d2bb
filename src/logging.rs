use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PAROLA_LOG";

/// Install the stderr diagnostic subscriber. `PAROLA_LOG` wins over the configured level.
pub fn init(configured_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, repeated calls) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
