//! Behavior when no default logger has been installed.
//!
//! This binary never calls `init`, so every macro here takes the
//! plain-println fallback path. Keep it that way: registering a logger
//! in one test would leak into the others.

use logx::{Level, Options};

#[test]
fn test_macros_fall_back_to_println() {
    assert!(logx::default_logger().is_none());

    logx::debugf!("debug {}", 1);
    logx::infof!("info {}", 2);
    logx::warnf!("warn {}", 3);
    logx::errorf!("error {}", 4);

    logx::debugmf!("tag", "debug {}", 1);
    logx::infomf!("tag", "info {}", 2);
    logx::warnmf!("tag", "warn {}", 3);
    logx::errormf!("tag", "error {}", 4);

    logx::debug!("plain debug value");
    logx::info!(2038);
}

#[test]
fn test_fatal_returns_instead_of_terminating() {
    assert!(logx::default_logger().is_none());

    logx::fatalf!("fatal {}", 1);
    logx::fatalmf!("tag", "fatal {}", 2);

    // Still running: unregistered fatal must not take the process down.
    assert!(logx::default_logger().is_none());
}

#[test]
fn test_logger_methods_work_without_registration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("direct.log");

    let logger = logx::Logger::new(
        &Options::new()
            .with_log_file(&path)
            .with_level(Level::Debug),
    );
    logger.set_tag("standalone");
    logger.printf(format_args!("n={}", 9));

    let content = std::fs::read_to_string(&path).expect("read log file");
    let record: serde_json::Value =
        serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record["msg"], "standalone");
    assert_eq!(record["info"], "n=9");
    assert!(logx::default_logger().is_none());
}
