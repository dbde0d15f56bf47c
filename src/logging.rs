//! Diagnostics on stderr through [`tracing`].

use tracing_subscriber::EnvFilter;

/// Install the global [`tracing_subscriber`] fmt subscriber, writing to stderr.
///
/// `RUST_LOG` wins if set, otherwise `verbose` picks the level of this crate:
/// `0` warn, `1` info, `2+` debug.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,imgur_dl={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
