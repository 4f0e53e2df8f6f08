//! Tagged records: a fixed `msg` naming the component, details in `info`.

use logx::{Level, Options};

fn main() {
    let options = Options::new()
        .with_log_file("./tagging.log")
        .with_level(Level::Debug);
    logx::init(&options);

    // The *mf macros take the tag per call.
    logx::infomf!("scheduler", "queued {} jobs", 42);
    logx::warnmf!("scheduler", "job {} retried {} times", "sync-7", 3);

    // A Logger instance carries a sticky tag for its print methods.
    let logger = logx::Logger::new(&options);
    logger.set_tag("ingest");
    logger.printf(format_args!("batch of {} rows", 1024));
    logger.println("flush complete");
    logger.print(0.99);
}
