use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Default level for `-v` occurrences; `RUST_LOG` still wins.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the stderr subscriber. Stdout carries report output only.
pub(crate) fn init(verbosity: u8) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
