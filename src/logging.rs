use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Events go to stderr so stdout carries only program output.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
