//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! Diagnostics go to stderr so that stdout stays clean for record output.
//!
//! - `warn` (default): rejected uploads, unreadable config files
//! - `info` (`-v`): saves, rejections, project creation
//! - `debug` (`-vv`): panel transitions, form reseeding
//! - `trace` (`-vvv`): everything
//!
//! `MDK_LOG` takes a full `EnvFilter` directive and overrides the flags.

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "MDK_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl LogConfig {
    /// Map `-v` count (and `-q`) to a level
    pub fn from_verbosity(verbosity: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbosity {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            with_ansi: console::Term::stderr().features().colors_supported(),
        }
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!("mdk={}", level.as_str().to_lowercase()))
    })
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}
