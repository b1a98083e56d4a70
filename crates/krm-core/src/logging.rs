//! Diagnostic logging setup
//!
//! Standard output carries the resource stream, so every diagnostic goes to
//! standard error.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pick the log filter from CLI verbosity, unless `RUST_LOG` is set
pub fn filter_for(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Initialize tracing with appropriate verbosity
pub fn init_tracing(verbose: u8, quiet: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter_for(verbose, quiet))
        .init();
}
