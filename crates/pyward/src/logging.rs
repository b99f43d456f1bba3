use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `pyward_core=debug`.
pub const LOG_ENV_VAR: &str = "PYWARD_LOG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Install a subscriber printing `tracing` events on stderr.
///
/// An explicit `level` wins over `PYWARD_LOG`, which wins over the default
/// `warn`.
pub fn init_logging(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::default().as_str())),
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    if result.is_err() {
        tracing::debug!("A global subscriber was already installed");
    }
}
