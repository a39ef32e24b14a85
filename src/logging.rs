//! Structured logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  /// Human-readable, multi-line
  Pretty,
  /// One line per event
  Compact,
  /// Machine-readable
  Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
  /// `EnvFilter` directive, e.g. `info` or `workout_coach_lib=debug`
  pub level: String,
  pub format: LogFormat,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      format: LogFormat::Pretty,
    }
  }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays parseable. A second call is a no-op.
pub fn init(config: &LoggingConfig) {
  let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
  let registry = tracing_subscriber::registry().with(filter);

  let result = match config.format {
    LogFormat::Pretty => registry
      .with(fmt::layer().pretty().with_writer(std::io::stderr))
      .try_init(),
    LogFormat::Compact => registry
      .with(fmt::layer().compact().with_writer(std::io::stderr))
      .try_init(),
    LogFormat::Json => registry
      .with(fmt::layer().json().with_writer(std::io::stderr))
      .try_init(),
  };

  if result.is_err() {
    tracing::debug!("tracing subscriber already installed");
  }
}
