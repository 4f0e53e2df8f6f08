use logx::Options;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let log_path = temp_dir.path().join("rotation.log");

    // 1 MB per file, keep 3 numbered backups.
    logx::init(
        &Options::new()
            .with_log_file(&log_path)
            .with_max_size(1)
            .with_max_backups(3),
    );

    for i in 0..20_000 {
        logx::infof!("log message number {} with some padding to grow the file", i);
    }

    if log_path.exists() {
        println!("active log file: {}", log_path.display());
    }
    for index in 1..=3 {
        let mut backup = log_path.clone().into_os_string();
        backup.push(format!(".{index}"));
        let backup = std::path::PathBuf::from(backup);
        if backup.exists() {
            println!("backup present: {}", backup.display());
        }
    }

    Ok(())
}
