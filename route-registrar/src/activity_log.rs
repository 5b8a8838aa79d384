use std::{
    fs::File,
    io::{LineWriter, Write},
    path::{Path, PathBuf},
};

use log::Level;

use crate::error::RouteRegistrationError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// timestamped record of a registration run. every entry is appended to the
/// log file as `[YYYY-mm-dd HH:MM:SS] message` and echoed to the console
/// through the `log` facade. the file is flushed when the log is dropped.
pub struct ActivityLog {
    path: Option<PathBuf>,
    writer: Option<LineWriter<File>>,
}

impl ActivityLog {
    /// opens the log file for a new run, discarding the contents of any
    /// previous run.
    pub fn create(path: &Path) -> Result<Self, RouteRegistrationError> {
        let file = File::create(path).map_err(|source| RouteRegistrationError::LogFileError {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self {
            path: Some(path.to_owned()),
            writer: Some(LineWriter::new(file)),
        })
    }

    /// a log that only echoes to the console.
    pub fn console_only() -> Self {
        Self {
            path: None,
            writer: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&mut self, message: &str) {
        self.record(Level::Info, message)
    }

    pub fn warn(&mut self, message: &str) {
        self.record(Level::Warn, message)
    }

    pub fn error(&mut self, message: &str) {
        self.record(Level::Error, message)
    }

    fn record(&mut self, level: Level, message: &str) {
        log::log!(level, "{message}");
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        if let Err(e) = writeln!(writer, "[{timestamp}] {message}") {
            log::warn!("failure writing to activity log: {e}");
        }
    }

    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                log::warn!("failure flushing activity log: {e}");
            }
        }
    }
}

impl Drop for ActivityLog {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        {
            let mut log = ActivityLog::create(&path).unwrap();
            log.info("started");
            log.warn("skipping row 3");
            log.error("failed");
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines = contents.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        for line in lines.iter() {
            assert!(line.starts_with('['));
            // "[YYYY-mm-dd HH:MM:SS] "
            assert_eq!(&line[20..22], "] ");
        }
        assert!(lines[0].ends_with("] started"));
        assert!(lines[1].ends_with("] skipping row 3"));
        chrono::NaiveDateTime::parse_from_str(&lines[2][1..20], TIMESTAMP_FORMAT)
            .expect("timestamp should parse");
    }

    #[test]
    fn test_create_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "stale entry\n").unwrap();
        {
            let mut log = ActivityLog::create(&path).unwrap();
            log.info("fresh");
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("fresh"));
    }

    #[test]
    fn test_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("run.log");
        let result = ActivityLog::create(&path);
        assert!(matches!(
            result,
            Err(RouteRegistrationError::LogFileError { .. })
        ));
    }

    #[test]
    fn test_console_only_has_no_path() {
        let mut log = ActivityLog::console_only();
        log.info("echo only");
        assert!(log.path().is_none());
    }
}
