//! Example of loading logger options from YAML.
//!
//! This example demonstrates how to deserialize `Options` from a YAML
//! document and initialize the default logger with it.
//!
//! Run with:
//! ```bash
//! cargo run --example config_yaml
//! ```

const CONFIG: &str = r#"
log_file: ./yaml-demo.log
max_size: 10
max_age: 7
max_backups: 5
level: debug
caller: true
time_format: RFC3339
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options: logx::Options = serde_yaml::from_str(CONFIG)?;
    logx::init(&options);

    logx::debugf!("this is a debug message (visible because level is debug)");
    logx::infof!("this is an info message");
    logx::warnf!("this is a warning message");
    logx::errorf!("this is an error message");

    logx::infomf!("auth", "user {} logged in", "alice");
    logx::warnmf!("api", "{} {} not found", "GET", "/api/users");

    Ok(())
}
