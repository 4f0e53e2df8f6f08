//! Basic logging example.
//!
//! This example demonstrates the simplest way to initialize the default
//! logger and emit records with the level macros.

use logx::Options;

fn main() {
    // Zero-valued options: ./default.log, 5 MB rotation, info level.
    logx::init(&Options::new());

    logx::infof!("service started on port {}", 8080);
    logx::warnf!("connection pool at {}%", 90);
    logx::errorf!("upstream returned {}", 502);

    // Dropped: the default minimum level is info.
    logx::debugf!("this message is not written");

    logx::info!("plain value, no formatting");
}
