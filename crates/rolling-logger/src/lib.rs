//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to stderr and to a
//! size-rotated `<app>.log` file. Records emitted through the `log` facade are
//! forwarded to the same subscriber.
//!
//! Filtering follows `RUST_LOG`, defaulting to `info`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Size at which the active log file is rotated
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const DEFAULT_KEEP_FILES: usize = 3;

static APP_NAME: OnceLock<String> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to prepare log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Append-only file that moves itself to `<path>.1` once it reaches
/// `max_bytes`, shifting older generations up to `<path>.<keep>`.
pub struct RollingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    keep: usize,
}

impl RollingFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, keep: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        let mut rolling = Self {
            path,
            file,
            written,
            max_bytes,
            keep,
        };
        if rolling.written >= rolling.max_bytes {
            rolling.rotate()?;
        }
        Ok(rolling)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `index`-th rotated generation (1 = most recent)
    pub fn rotated_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.keep == 0 {
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.rotated_path(self.keep);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.keep).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.rotated_path(1))?;

        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Initialize logging into `<log_dir>/<app_name>.log` with default limits.
/// Returns the path of the active log file.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_with_limits(log_dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_KEEP_FILES)
}

pub fn init_with_limits(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    max_bytes: u64,
    keep: usize,
) -> Result<PathBuf, LoggerError> {
    if APP_NAME.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(format!("{app_name}.log"));
    let file = RollingFile::open(&path, max_bytes, keep)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = APP_NAME.set(app_name.to_string());
    tracing::info!(
        app = app_name,
        started_at = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        "logger initialized"
    );
    Ok(path)
}

fn ensure_initialized() -> Result<(), LoggerError> {
    APP_NAME.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{message}");
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{message}");
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{message}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path().join("app.log"), 10, 2).unwrap();

        file.write_all(b"0123456789").unwrap();
        file.write_all(b"abcdef").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(file.rotated_path(1)).unwrap(), "0123456789");
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "abcdef");
    }

    #[test]
    fn test_keeps_bounded_generations() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path().join("app.log"), 4, 2).unwrap();

        for chunk in [b"aaaa", b"bbbb", b"cccc", b"dddd"] {
            file.write_all(chunk).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(file.path()).unwrap(), "dddd");
        assert_eq!(fs::read_to_string(file.rotated_path(1)).unwrap(), "cccc");
        assert_eq!(fs::read_to_string(file.rotated_path(2)).unwrap(), "bbbb");
        assert!(!file.rotated_path(3).exists());
    }

    #[test]
    fn test_rotates_oversized_file_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "previous run").unwrap();

        let file = RollingFile::open(&path, 5, 1).unwrap();
        assert_eq!(fs::read_to_string(file.rotated_path(1)).unwrap(), "previous run");
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "");
    }

    // Only test in this crate that installs the global subscriber
    #[test]
    fn test_helpers_write_after_init() {
        assert!(matches!(info("too early"), Err(LoggerError::NotInitialized)));

        let dir = tempfile::tempdir().unwrap();
        let path = init_logger(dir.path(), "helpers").unwrap();
        assert_eq!(path, dir.path().join("helpers.log"));

        info("DB init success").unwrap();
        error("DB init failed: disk full").unwrap();
        assert!(matches!(
            init_logger(dir.path(), "again"),
            Err(LoggerError::AlreadyInitialized)
        ));

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("DB init failed: disk full"));
        assert!(!written.contains("too early"));
    }
}
