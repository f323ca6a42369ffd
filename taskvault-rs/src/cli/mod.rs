//! CLI command implementations.

pub mod args;
pub mod edit;
pub mod output;
pub mod tasks;

pub use args::{Cli, Commands};
pub use output::Output;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` always takes precedence; otherwise `-v` selects debug, `-vv`
/// trace, and the default is warn.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
