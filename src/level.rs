use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::level_filters::LevelFilter;

/// Severity of a log record.
///
/// A record is emitted only when the logger's configured minimum level is
/// less than or equal to the record's level, so `Debug` is the most verbose
/// setting and `Fatal` the quietest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail, normally disabled in production.
    Debug,
    /// Routine operational records.
    #[default]
    Info,
    /// Something unexpected that the process can continue past.
    Warn,
    /// A failed operation.
    Error,
    /// An unrecoverable failure; the process exits after the record is written.
    Fatal,
}

impl Level {
    /// The lowercase name used in encoded records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized level name.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

// `tracing` has no level above ERROR; fatal records are dispatched at ERROR
// and the encoder restores the `fatal` label from a marker field.
impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error | Level::Fatal => tracing::Level::ERROR,
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        LevelFilter::from_level(level.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_level_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Debug.to_string(), "debug");
        assert_eq!(Level::Fatal.to_string(), "fatal");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_serde_lowercase() {
        let yaml: Level = serde_yaml::from_str("error").unwrap();
        assert_eq!(yaml, Level::Error);
        assert_eq!(serde_yaml::to_string(&Level::Warn).unwrap().trim(), "warn");
    }

    #[test]
    fn test_level_into_tracing() {
        assert_eq!(tracing::Level::from(Level::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(Level::Fatal), tracing::Level::ERROR);
        assert_eq!(LevelFilter::from(Level::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(Level::Fatal), LevelFilter::ERROR);
    }
}
