use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::options::{DEFAULT_MAX_AGE, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SIZE};

/// Retention limits for a [`RotatingFileWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum size of the active file in bytes before it is rotated
    /// (0 disables size rotation).
    pub max_bytes: u64,
    /// Backups with a modification time older than this many days are
    /// removed during rotation (0 keeps backups regardless of age).
    pub max_age_days: u64,
    /// Number of numbered backups to keep (0 keeps all of them).
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE * 1024 * 1024,
            max_age_days: DEFAULT_MAX_AGE,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }
}

/// State of the open log file.
#[derive(Debug)]
struct FileState {
    file: File,
    size: u64,
}

/// An appending file writer that rotates into numbered backups.
///
/// The file is opened lazily on the first write, creating missing parent
/// directories. When a write would push the active file past
/// `max_bytes`, its content is copied to `<path>.1` (existing backups
/// shift to `.2`, `.3`, ... up to `max_backups`) and the active file is
/// truncated in place, so readers following the active path keep working.
///
/// Clones share the underlying file state.
#[derive(Debug, Clone)]
pub struct RotatingFileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    state: Arc<Mutex<Option<FileState>>>,
}

impl RotatingFileWriter {
    /// Create a writer for `path`. No file is touched until the first write.
    pub fn new<P: Into<PathBuf>>(path: P, policy: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            state: Arc::new(Mutex::new(None)),
        }
    }

    /// Append a complete record, rotating first if it would exceed the
    /// size limit.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self.state.lock().unwrap();

        let mut state = match guard.take() {
            Some(state) => state,
            None => self.open_state()?,
        };

        if self.should_rotate(state.size, buf.len()) {
            drop(state);
            self.rotate()?;
            state = self.open_state()?;
        }

        state.file.write_all(buf)?;
        state.size += buf.len() as u64;
        *guard = Some(state);
        Ok(())
    }

    fn should_rotate(&self, current_size: u64, incoming: usize) -> bool {
        self.policy.max_bytes > 0 && current_size + incoming as u64 > self.policy.max_bytes
    }

    fn open_state(&self) -> io::Result<FileState> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(FileState { file, size })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shift existing backups up one slot, copy the active file to `.1`,
    /// then truncate the active file in place.
    fn rotate(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let mut slot = 1;
        while self.backup_path(slot).exists() {
            slot += 1;
        }
        if self.policy.max_backups > 0 && slot > self.policy.max_backups {
            fs::remove_file(self.backup_path(self.policy.max_backups))?;
            slot = self.policy.max_backups;
        }
        for index in (1..slot).rev() {
            fs::rename(self.backup_path(index), self.backup_path(index + 1))?;
        }

        fs::copy(&self.path, self.backup_path(1))?;
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        if self.policy.max_age_days > 0
            && let Some(cutoff) = SystemTime::now()
                .checked_sub(Duration::from_secs(self.policy.max_age_days * 86_400))
        {
            self.prune_aged(cutoff)?;
        }

        Ok(())
    }

    /// Remove backups whose modification time is older than `cutoff`.
    /// Backup mtimes decrease along the chain, so the stale entries form
    /// a suffix.
    fn prune_aged(&self, cutoff: SystemTime) -> io::Result<()> {
        let mut index = 1;
        loop {
            let backup = self.backup_path(index);
            let modified = match backup.metadata().and_then(|meta| meta.modified()) {
                Ok(modified) => modified,
                Err(_) => return Ok(()),
            };
            if modified < cutoff {
                break;
            }
            index += 1;
        }

        loop {
            let backup = self.backup_path(index);
            if !backup.exists() {
                return Ok(());
            }
            fs::remove_file(&backup)?;
            index += 1;
        }
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let guard = self.state.lock().unwrap();
        match guard.as_ref() {
            Some(state) => state.file.sync_all(),
            None => Ok(()),
        }
    }
}
