//! Level-gated logging macros routed through the process-wide default
//! logger.
//!
//! Every macro follows the same contract: with a default logger installed,
//! the record is formatted and dispatched only if it passes the configured
//! minimum level; with no default logger, the formatted message goes to
//! standard output via `println!` regardless of level, and nothing else
//! happens (in particular, the fatal macros do not terminate the process).

#[doc(hidden)]
#[macro_export]
macro_rules! __logf {
    ($level:ident, $tracing_level:ident, $($arg:tt)+) => {
        match $crate::default_logger() {
            Some(logger) => {
                if logger.enabled($crate::Level::$level) {
                    logger.in_scope(|| {
                        $crate::tracing::event!($crate::tracing::Level::$tracing_level, $($arg)+);
                    });
                }
            }
            None => ::std::println!($($arg)+),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __logmf {
    ($level:ident, $tracing_level:ident, $tag:expr, $($arg:tt)+) => {
        match $crate::default_logger() {
            Some(logger) => {
                if logger.enabled($crate::Level::$level) {
                    let info = ::std::format!($($arg)+);
                    logger.in_scope(|| {
                        $crate::tracing::event!(
                            $crate::tracing::Level::$tracing_level,
                            info = %info,
                            "{}",
                            $tag
                        );
                    });
                }
            }
            None => ::std::println!($($arg)+),
        }
    };
}

/// Log a formatted message at debug level.
///
/// ```
/// logx::debugf!("cache warmed in {}ms", 12);
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => { $crate::__logf!(Debug, DEBUG, $($arg)+) };
}

/// Log a debug record with `tag` as the message and the formatted text
/// in the `info` field.
///
/// ```
/// logx::debugmf!("cache", "warmed in {}ms", 12);
/// ```
#[macro_export]
macro_rules! debugmf {
    ($tag:expr, $($arg:tt)+) => { $crate::__logmf!(Debug, DEBUG, $tag, $($arg)+) };
}

/// Log a single value at debug level, rendered with its `Display` impl.
#[macro_export]
macro_rules! debug {
    ($value:expr) => {
        match $crate::default_logger() {
            Some(logger) => {
                if logger.enabled($crate::Level::Debug) {
                    logger.in_scope(|| {
                        $crate::tracing::event!($crate::tracing::Level::DEBUG, "{}", $value);
                    });
                }
            }
            None => ::std::println!("{}", $value),
        }
    };
}

/// Log a formatted message at info level.
///
/// ```
/// logx::infof!("listening on {}", "0.0.0.0:4000");
/// ```
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => { $crate::__logf!(Info, INFO, $($arg)+) };
}

/// Log an info record with `tag` as the message and the formatted text
/// in the `info` field.
///
/// ```
/// logx::infomf!("gateway", "accepted {} from {}", "GET /", "10.0.0.2");
/// ```
#[macro_export]
macro_rules! infomf {
    ($tag:expr, $($arg:tt)+) => { $crate::__logmf!(Info, INFO, $tag, $($arg)+) };
}

/// Log a single value at info level, rendered with its `Display` impl.
///
/// ```
/// logx::info!(200);
/// ```
#[macro_export]
macro_rules! info {
    ($value:expr) => {
        match $crate::default_logger() {
            Some(logger) => {
                if logger.enabled($crate::Level::Info) {
                    logger.in_scope(|| {
                        $crate::tracing::event!($crate::tracing::Level::INFO, "{}", $value);
                    });
                }
            }
            None => ::std::println!("{}", $value),
        }
    };
}

/// Log a formatted message at warn level.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => { $crate::__logf!(Warn, WARN, $($arg)+) };
}

/// Log a warn record with `tag` as the message and the formatted text in
/// the `info` field.
#[macro_export]
macro_rules! warnmf {
    ($tag:expr, $($arg:tt)+) => { $crate::__logmf!(Warn, WARN, $tag, $($arg)+) };
}

/// Log a formatted message at error level.
///
/// ```
/// logx::errorf!("upstream {} unreachable", "10.0.0.2:6379");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => { $crate::__logf!(Error, ERROR, $($arg)+) };
}

/// Log an error record with `tag` as the message and the formatted text
/// in the `info` field.
#[macro_export]
macro_rules! errormf {
    ($tag:expr, $($arg:tt)+) => { $crate::__logmf!(Error, ERROR, $tag, $($arg)+) };
}

/// Log a formatted message at fatal level, then exit the process with
/// status 1.
///
/// The record is written to both sinks before the exit. With no default
/// logger installed this prints to standard output and returns normally.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        match $crate::default_logger() {
            Some(logger) => {
                if logger.enabled($crate::Level::Fatal) {
                    logger.in_scope(|| {
                        $crate::tracing::event!(
                            $crate::tracing::Level::ERROR,
                            fatal = true,
                            $($arg)+
                        );
                    });
                    ::std::process::exit(1);
                }
            }
            None => ::std::println!($($arg)+),
        }
    };
}

/// Log a fatal record with `tag` as the message and the formatted text
/// in the `info` field, then exit the process with status 1.
///
/// With no default logger installed this prints to standard output and
/// returns normally.
#[macro_export]
macro_rules! fatalmf {
    ($tag:expr, $($arg:tt)+) => {
        match $crate::default_logger() {
            Some(logger) => {
                if logger.enabled($crate::Level::Fatal) {
                    let info = ::std::format!($($arg)+);
                    logger.in_scope(|| {
                        $crate::tracing::event!(
                            $crate::tracing::Level::ERROR,
                            fatal = true,
                            info = %info,
                            "{}",
                            $tag
                        );
                    });
                    ::std::process::exit(1);
                }
            }
            None => ::std::println!($($arg)+),
        }
    };
}
