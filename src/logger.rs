use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, RwLock};

use once_cell::sync::Lazy;
use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::encoder::JsonEncoder;
use crate::layer::JsonLayer;
use crate::level::Level;
use crate::options::Options;
use crate::writer::{RotatingFileWriter, RotationPolicy};

static DEFAULT_LOGGER: Lazy<RwLock<Option<Arc<Logger>>>> = Lazy::new(|| RwLock::new(None));

/// A configured logging pipeline.
///
/// Each logger owns its own dispatcher: a level filter in front of a JSON
/// layer that writes every record to standard output and a rotating file.
/// Loggers are independent; installing one as the process-wide default is
/// what routes the free logging macros through it.
#[derive(Debug)]
pub struct Logger {
    dispatch: Dispatch,
    level: Level,
    tag: Mutex<String>,
}

impl Logger {
    /// Build a logger from `options`.
    ///
    /// Zero-value fields resolve to the documented defaults. The log file
    /// is opened lazily on the first record, so construction itself cannot
    /// fail; an unwritable path costs the file copy of each record while
    /// standard output keeps receiving them.
    pub fn new(options: &Options) -> Self {
        let policy = RotationPolicy {
            max_bytes: options.effective_max_size() * 1024 * 1024,
            max_age_days: options.effective_max_age(),
            max_backups: options.effective_max_backups(),
        };
        let writer = RotatingFileWriter::new(options.effective_log_file(), policy);
        let encoder = JsonEncoder::new(options.time_format, options.effective_caller());

        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::from(options.level))
            .with(JsonLayer::new(encoder, writer));

        Self {
            dispatch: Dispatch::new(subscriber),
            level: options.level,
            tag: Mutex::new(String::new()),
        }
    }

    /// The minimum severity this logger emits.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether a record at `level` passes this logger's minimum.
    pub fn enabled(&self, level: Level) -> bool {
        self.level <= level
    }

    /// Run `f` with this logger's pipeline installed as the current
    /// dispatcher, so `tracing` events emitted inside reach it.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Set the tag used as the `msg` of records emitted by the
    /// `print`-family methods.
    pub fn set_tag(&self, tag: impl Into<String>) {
        *self.tag.lock().unwrap() = tag.into();
    }

    /// Emit an info record carrying the stored tag as `msg` and `value`
    /// as the `info` field.
    #[track_caller]
    pub fn print(&self, value: impl fmt::Display) {
        self.emit_tagged(format_args!("{value}"));
    }

    /// Same record shape as [`print`](Self::print).
    #[track_caller]
    pub fn println(&self, value: impl fmt::Display) {
        self.emit_tagged(format_args!("{value}"));
    }

    /// Emit an info record carrying the stored tag as `msg` and the
    /// formatted arguments as the `info` field.
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit_tagged(args);
    }

    #[track_caller]
    fn emit_tagged(&self, info: fmt::Arguments<'_>) {
        let location = Location::caller();
        let tag = self.tag.lock().unwrap().clone();
        self.in_scope(|| {
            tracing::event!(
                tracing::Level::INFO,
                info = %info,
                caller.file = location.file(),
                caller.line = location.line() as u64,
                "{}",
                tag
            );
        });
    }
}

/// Install `logger` as the process-wide default, replacing any previous
/// one. Meant to be called once at startup, before threads that log are
/// spawned.
pub fn init_logger(logger: Logger) {
    *DEFAULT_LOGGER.write().unwrap() = Some(Arc::new(logger));
}

/// Build a logger from `options` and install it as the process-wide
/// default.
pub fn init(options: &Options) {
    init_logger(Logger::new(options));
}

/// The process-wide default logger, if one has been installed.
pub fn default_logger() -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::TimeFormat;

    fn read_single_record(path: &std::path::Path) -> serde_json::Value {
        let content = std::fs::read_to_string(path).expect("read log file");
        let mut lines = content.lines();
        let record = serde_json::from_str(lines.next().expect("one record")).unwrap();
        assert!(lines.next().is_none(), "expected exactly one record");
        record
    }

    #[test]
    fn test_level_round_trip() {
        for level in [
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
        ] {
            let logger = Logger::new(&Options::new().with_level(level));
            assert_eq!(logger.level(), level);
        }
    }

    #[test]
    fn test_enabled_matrix() {
        let logger = Logger::new(&Options::new().with_level(Level::Warn));
        assert!(!logger.enabled(Level::Debug));
        assert!(!logger.enabled(Level::Info));
        assert!(logger.enabled(Level::Warn));
        assert!(logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Fatal));
    }

    #[test]
    fn test_print_records_tag_info_and_caller() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("print.log");

        let logger = Logger::new(&Options::new().with_log_file(&path));
        logger.set_tag("svc");
        logger.print("hello");

        let record = read_single_record(&path);
        assert_eq!(record["msg"], "svc");
        assert_eq!(record["info"], "hello");
        assert!(
            record["source"].as_str().unwrap().contains("logger.rs"),
            "print should report its caller, got {}",
            record["source"]
        );
    }

    #[test]
    fn test_printf_formats_into_info() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("printf.log");

        let logger = Logger::new(&Options::new().with_log_file(&path));
        logger.set_tag("svc");
        logger.printf(format_args!("x={} y={}", 3, "z"));

        let record = read_single_record(&path);
        assert_eq!(record["msg"], "svc");
        assert_eq!(record["info"], "x=3 y=z");
    }

    #[test]
    fn test_println_matches_print_shape() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("println.log");

        let logger = Logger::new(&Options::new().with_log_file(&path));
        logger.println(42);

        let record = read_single_record(&path);
        assert_eq!(record["msg"], "", "tag defaults to empty");
        assert_eq!(record["info"], "42");
    }

    #[test]
    fn test_methods_respect_min_level() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gated.log");

        let logger = Logger::new(
            &Options::new()
                .with_log_file(&path)
                .with_level(Level::Error),
        );
        logger.print("should not appear");

        assert!(
            !path.exists(),
            "an info record must not reach the file when the minimum is error"
        );
    }

    #[test]
    fn test_scoped_event_uses_configured_time_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("iso.log");

        let logger = Logger::new(
            &Options::new()
                .with_log_file(&path)
                .with_time_format(TimeFormat::Iso8601),
        );
        logger.in_scope(|| {
            tracing::event!(tracing::Level::INFO, "stamped");
        });

        let record = read_single_record(&path);
        let timestamp = record["timestamp"].as_str().expect("string timestamp");
        assert!(timestamp.contains('T'));
        assert!(timestamp.ends_with('Z'));
    }
}
