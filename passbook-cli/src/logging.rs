use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level for our crates from `-v`/`-q`.
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn log_filter(verbose: u8, quiet: bool) -> String {
    let level = log_level(verbose, quiet);
    format!("passbook={level},passbook_core={level},passbook_ingest={level}")
}

/// Stderr logging. `RUST_LOG` overrides the flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose > 1)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
