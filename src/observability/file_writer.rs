//! Rotating file writer with size-based rotation and backup retention.
//!
//! Trace batches are appended one JSON document per line. When the file grows
//! past the policy's threshold it is renamed to `<file name>.<nanos>` and a
//! fresh file is started; only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_file_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct FileWriter {
    file_path: PathBuf,
    policy: RotationPolicy,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            file_path,
            policy,
            writer: Mutex::new(None),
        }
    }

    /// Appends one line, rotating first if the file is over the threshold.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening, or writing fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        let file = match writer.as_mut() {
            Some(file) => file,
            None => writer.insert(OpenOptions::new().create(true).append(true).open(&self.file_path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.policy.max_file_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let mut stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        let mut backup = backup_path(&self.file_path, stamp);
        while backup.exists() {
            stamp += 1;
            backup = backup_path(&self.file_path, stamp);
        }
        if self.file_path.exists() {
            fs::rename(&self.file_path, backup)?;
        }

        self.prune_backups()
    }

    /// Deletes all but the newest `max_backups` rotated files. Removal errors are ignored.
    fn prune_backups(&self) -> io::Result<()> {
        let parent = match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let prefix = format!("{}.", file_name(&self.file_path)?);

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let stamp = name.to_str()?.strip_prefix(&prefix)?.parse::<u128>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, old) in backups.iter().skip(self.policy.max_backups) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> io::Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "trace file has no valid name"))
}

fn backup_path(path: &Path, stamp: u128) -> PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(format!(".{stamp}"));
    path.with_file_name(name)
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
