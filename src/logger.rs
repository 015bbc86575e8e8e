use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default level for a given number of `-v` flags. `RUST_LOG` still wins
/// when it is set.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn env_filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy()
}

/// Logs to stderr so route listings on stdout stay clean.
pub fn init_logger(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level_for(verbosity)))
        .with_writer(std::io::stderr)
        .init();
}

/// Captured by the test harness. Safe to call from every test.
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(LevelFilter::DEBUG))
        .with_test_writer()
        .try_init();
}
