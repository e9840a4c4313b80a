//! Logging setup for the command-line tool.
//!
//! The library only emits `tracing` events; embedders install their own
//! subscriber. The binary uses [`init_logging`].

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Verbosity of the command-line output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
  /// No output.
  Silent,
  /// Errors only.
  Error,
  /// Errors and warnings (default).
  #[default]
  Warn,
  /// Adds per-build summaries.
  Info,
  /// Adds per-asset decisions.
  Debug,
}

impl LogLevel {
  fn as_filter(&self) -> &'static str {
    match self {
      LogLevel::Silent => "off",
      LogLevel::Error => "error",
      LogLevel::Warn => "warn",
      LogLevel::Info => "info",
      LogLevel::Debug => "debug",
    }
  }
}

impl std::str::FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "silent" | "off" => Ok(LogLevel::Silent),
      "error" => Ok(LogLevel::Error),
      "warn" | "warning" => Ok(LogLevel::Warn),
      "info" => Ok(LogLevel::Info),
      "debug" => Ok(LogLevel::Debug),
      other => Err(format!("invalid log level: {other}")),
    }
  }
}

impl std::fmt::Display for LogLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_filter())
  }
}

/// Install a global subscriber once; `RUST_LOG` directives take precedence.
pub fn init_logging(level: LogLevel) {
  INIT.call_once(|| {
    let filter = EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::registry()
      .with(filter)
      .with(fmt::layer().compact().with_target(false).without_time())
      .init();
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_levels() {
    assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Silent);
    assert!("loud".parse::<LogLevel>().is_err());
  }

  #[test]
  fn displays_filter_directive() {
    assert_eq!(LogLevel::Debug.to_string(), "debug");
    assert_eq!(LogLevel::default().to_string(), "warn");
  }
}
