// src/log.rs
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "cec_scrape=info",
        1 => "cec_scrape=debug",
        _ => "cec_scrape=trace",
    }
}

/// Install the global subscriber: compact lines on stderr so stdout stays
/// free for status output. `RUST_LOG` overrides `verbose`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .try_init();
}
