use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encoder::TimeFormat;
use crate::level::Level;

/// Log file path used when `log_file` is left empty.
pub const DEFAULT_LOG_FILE: &str = "./default.log";
/// Maximum log file size in megabytes used when `max_size` is left at 0.
pub const DEFAULT_MAX_SIZE: u64 = 5;
/// Maximum backup age in days used when `max_age` is left at 0.
pub const DEFAULT_MAX_AGE: u64 = 3;
/// Number of rotated backups kept when `max_backups` is left at 0.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Configuration for a [`Logger`](crate::Logger).
///
/// Fields left at their zero value resolve to the documented defaults when
/// the logger is built; the `effective_*` methods expose that resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Path of the active log file (empty means [`DEFAULT_LOG_FILE`]).
    #[serde(default)]
    pub log_file: PathBuf,
    /// Maximum size of the active file in megabytes before rotation
    /// (0 means [`DEFAULT_MAX_SIZE`]).
    #[serde(default)]
    pub max_size: u64,
    /// Rotated backups older than this many days are removed
    /// (0 means [`DEFAULT_MAX_AGE`]).
    #[serde(default)]
    pub max_age: u64,
    /// Number of rotated backups to keep (0 means [`DEFAULT_MAX_BACKUPS`]).
    #[serde(default)]
    pub max_backups: usize,
    /// Minimum severity emitted by the logger.
    #[serde(default)]
    pub level: Level,
    /// Whether records carry the `source` key with the caller's file and
    /// line. Unset means enabled.
    #[serde(default)]
    pub caller: Option<bool>,
    /// Encoding of the `timestamp` key.
    #[serde(default)]
    pub time_format: TimeFormat,
}

impl Options {
    /// Create options with every field at its zero value.
    pub fn new() -> Self {
        Self {
            log_file: PathBuf::new(),
            max_size: 0,
            max_age: 0,
            max_backups: 0,
            level: Level::default(),
            caller: None,
            time_format: TimeFormat::default(),
        }
    }

    /// Set the log file path.
    pub fn with_log_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_file = path.into();
        self
    }

    /// Set the maximum file size in megabytes.
    pub fn with_max_size(mut self, megabytes: u64) -> Self {
        self.max_size = megabytes;
        self
    }

    /// Set the maximum backup age in days.
    pub fn with_max_age(mut self, days: u64) -> Self {
        self.max_age = days;
        self
    }

    /// Set the number of rotated backups to keep.
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// Set the minimum severity.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable caller reporting.
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.caller = Some(enabled);
        self
    }

    /// Set the timestamp encoding.
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    /// The log file path with the empty value resolved to the default.
    pub fn effective_log_file(&self) -> PathBuf {
        if self.log_file.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_LOG_FILE)
        } else {
            self.log_file.clone()
        }
    }

    /// The size limit in megabytes with 0 resolved to the default.
    pub fn effective_max_size(&self) -> u64 {
        if self.max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            self.max_size
        }
    }

    /// The age limit in days with 0 resolved to the default.
    pub fn effective_max_age(&self) -> u64 {
        if self.max_age == 0 {
            DEFAULT_MAX_AGE
        } else {
            self.max_age
        }
    }

    /// The backup count with 0 resolved to the default.
    pub fn effective_max_backups(&self) -> usize {
        if self.max_backups == 0 {
            DEFAULT_MAX_BACKUPS
        } else {
            self.max_backups
        }
    }

    /// The caller flag with the unset state resolved to enabled.
    pub fn effective_caller(&self) -> bool {
        self.caller.unwrap_or(true)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
