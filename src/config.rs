//! Runtime configuration from environment variables
//!
//! `.env` is loaded by `run()` before this is read, so values can live in
//! either place.

use std::env;
use thiserror::Error;

use crate::logging::{LogFormat, LoggingConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://workout-coach.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("{name} must be a positive integer, got {value:?}")]
  InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub max_connections: u32,
  pub logging: LoggingConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let database_url = env::var("DATABASE_URL")
      .ok()
      .filter(|url| !url.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
      Ok(raw) => match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
          return Err(ConfigError::InvalidNumber {
            name: "DATABASE_MAX_CONNECTIONS",
            value: raw,
          })
        }
      },
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let format = match env::var("LOG_FORMAT").as_deref() {
      Ok("json") => LogFormat::Json,
      Ok("compact") => LogFormat::Compact,
      _ => LogFormat::Pretty,
    };

    Ok(Self {
      database_url,
      max_connections,
      logging: LoggingConfig { level, format },
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_defaults_when_unset() {
    temp_env::with_vars_unset(
      ["DATABASE_URL", "DATABASE_MAX_CONNECTIONS", "RUST_LOG", "LOG_FORMAT"],
      || {
        let config = AppConfig::from_env().expect("Defaults should be valid");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
      },
    );
  }

  #[test]
  #[serial]
  fn test_reads_overrides() {
    temp_env::with_vars(
      [
        ("DATABASE_URL", Some("sqlite::memory:")),
        ("DATABASE_MAX_CONNECTIONS", Some("2")),
        ("RUST_LOG", Some("workout_coach_lib=debug")),
        ("LOG_FORMAT", Some("json")),
      ],
      || {
        let config = AppConfig::from_env().expect("Overrides should be valid");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.logging.level, "workout_coach_lib=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
      },
    );
  }

  #[test]
  #[serial]
  fn test_blank_database_url_falls_back() {
    temp_env::with_var("DATABASE_URL", Some("  "), || {
      let config = AppConfig::from_env().expect("Should fall back");
      assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    });
  }

  #[test]
  #[serial]
  fn test_rejects_bad_connection_count() {
    for bad in ["zero", "0", "-3"] {
      temp_env::with_var("DATABASE_MAX_CONNECTIONS", Some(bad), || {
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(
          err,
          ConfigError::InvalidNumber {
            name: "DATABASE_MAX_CONNECTIONS",
            value: bad.to_string(),
          }
        );
      });
    }
  }
}
