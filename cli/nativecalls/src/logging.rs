//! Tracing subscriber setup for the CLI.

use tracing_subscriber::filter::EnvFilter;

/// Install a stderr fmt subscriber.
///
/// `-v` selects `info`, `-vv` and above `debug`. Without flags the filter is
/// read from `NATIVECALLS_LOG`, then `RUST_LOG`, and defaults to `warn`.
pub fn init_logging(verbose: u8) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_env("NATIVECALLS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
