//! # Fetch Error Reporting
//!
//! The [`Fetcher`](crate::Fetcher) never surfaces transport errors to its
//! callers. Instead every failure is handed to an [`ErrorReporter`], and the
//! caller decides where those reports end up.

use chrono::Local;
use std::{
    fs::OpenOptions,
    io::Write as _,
    path::{
        Path,
        PathBuf,
    },
    sync::Mutex,
};

pub trait ErrorReporter: Send + Sync {
    fn report(&self, host: &str, method: &str, error: &str);
}

/// Appends one line per failure to a file named after the host.
///
/// Line format: `<local timestamp> --- <method>\t<error>\r\n`.
#[derive(Debug)]
pub struct FileErrorReporter {
    directory: PathBuf,
    // Serializes appends from concurrently running collectors.
    write_lock: Mutex<()>,
}

impl FileErrorReporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn log_path(&self, host: &str) -> PathBuf {
        self.directory.join(host)
    }

    fn format_line(method: &str, error: &str) -> String {
        format!(
            "{} --- {}\t{}\r\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
            method,
            error
        )
    }

    fn append(&self, path: &Path, line: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())
    }
}

impl Default for FileErrorReporter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ErrorReporter for FileErrorReporter {
    fn report(&self, host: &str, method: &str, error: &str) {
        let path = self.log_path(host);
        let line = Self::format_line(method, error);
        if let Err(err) = self.append(&path, &line) {
            warn!(path = %path.display(), %method, %error, "failed to write fetch error log: {err}");
        }
    }
}

/// Emits fetch failures as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, host: &str, method: &str, error: &str) {
        warn!(%host, %method, %error, "fetch failed");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use temp_dir::TempDir;

    #[test]
    fn appends_one_line_per_report() {
        let dir = TempDir::new().unwrap();
        let reporter = FileErrorReporter::new(dir.path());

        reporter.report("10.0.0.1:3000", "agents", "connection refused");
        reporter.report("10.0.0.1:3000", "startTime", "operation timed out");

        let content = std::fs::read_to_string(dir.path().join("10.0.0.1:3000")).unwrap();
        let lines: Vec<&str> = content.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" --- agents\tconnection refused"));
        assert!(lines[1].ends_with(" --- startTime\toperation timed out"));
    }

    #[test]
    fn unwritable_log_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let reporter = FileErrorReporter::new(dir.path().join("missing").join("nested"));
        reporter.report("host", "agents", "boom");
        assert!(!dir.path().join("missing").exists());
    }
}
