//! # logx
//!
//! A thin logging facade that writes single-line JSON records to standard
//! output and a size-rotating log file at the same time.
//!
//! ## Features
//!
//! - Level-gated macros (`infof!`, `errormf!`, ...) routed through a
//!   process-wide default logger
//! - Records carry `timestamp`, `level`, `source`, `msg` and `info` keys,
//!   with configurable timestamp encoding
//! - File rotation by size with numbered backups, capped by count and age
//! - Stdout-only fallback when no default logger is installed
//!
//! Structured dispatch is delegated to the [`tracing`] ecosystem; this
//! crate adds the configuration surface, the JSON record shape, and the
//! rotating file sink.
//!
//! ## Example
//!
//! ```no_run
//! use logx::{Level, Options};
//!
//! let options = Options::new()
//!     .with_log_file("logs/app.log")
//!     .with_max_size(10)
//!     .with_level(Level::Debug);
//! logx::init(&options);
//!
//! logx::infof!("listening on {}", "0.0.0.0:4000");
//! logx::infomf!("gateway", "accepted connection from {}", "10.0.0.2");
//! logx::errorf!("upstream unreachable: {}", "timeout");
//! ```

pub mod encoder;
pub mod level;
pub mod logger;
pub mod options;
pub mod writer;

mod layer;
mod macros;

pub use encoder::TimeFormat;
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, default_logger, init, init_logger};
pub use options::{
    DEFAULT_LOG_FILE, DEFAULT_MAX_AGE, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SIZE, Options,
};
pub use writer::{RotatingFileWriter, RotationPolicy};

// Macro expansions emit events through this re-export so callers don't
// need their own `tracing` dependency.
#[doc(hidden)]
pub use tracing;
