use tracing_subscriber::EnvFilter;
use crate::core::domain::Configuration;

// installs the global subscriber once; later calls (e.g. from tests) are ignored
pub fn setup_tracing(config: &Configuration) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lms_circulation={}", config.log_level)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ANSI color codes show up in a confusing manner in collected logs.
        .with_ansi(false);
    let _ = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
