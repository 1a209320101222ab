//! Session log
//!
//! Every flight session writes its command/state trace to stderr and,
//! when configured, appends it to a log file as plain text. The subscriber
//! is installed for the current thread only and removed when the
//! [`SessionLog`] goes away, so several sessions (or tests) can each keep
//! their own log.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::config::LoggingConfig;
use crate::error::{NavError, Result};

/// Shared handle onto the append-mode log file
#[derive(Clone)]
struct LogFile(Arc<Mutex<BufWriter<File>>>);

impl LogFile {
    fn with<T>(&self, f: impl FnOnce(&mut BufWriter<File>) -> T) -> T {
        let mut file = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut file)
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Active session log; logging stops when this is finished or dropped
pub struct SessionLog {
    file: Option<LogFile>,
    _guard: DefaultGuard,
}

impl SessionLog {
    /// Install the session subscriber on the current thread
    ///
    /// `RUST_LOG` overrides the configured level when set.
    pub fn start(config: &LoggingConfig) -> Result<Self> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
                NavError::Config(format!("Invalid log level '{}': {}", config.level, e))
            })?,
        };

        let file = match &config.file {
            Some(path) => {
                let handle = OpenOptions::new().create(true).append(true).open(path)?;
                Some(LogFile(Arc::new(Mutex::new(BufWriter::new(handle)))))
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(file.clone().map(|writer| {
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
            }));

        let guard = tracing::subscriber::set_default(subscriber);
        if let Some(path) = &config.file {
            tracing::debug!("Session log file: {}", path.display());
        }

        Ok(Self {
            file,
            _guard: guard,
        })
    }

    /// Flush the log file and end the session log
    pub fn finish(mut self) -> Result<()> {
        self.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for SessionLog {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let config = LoggingConfig {
            level: "info".to_string(),
            file: Some(path.clone()),
        };

        let log = SessionLog::start(&config).unwrap();
        tracing::info!("forward 100 -> position (100.0, 0.0)");
        log.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("forward 100 -> position (100.0, 0.0)"));
    }

    #[test]
    fn test_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let config = LoggingConfig {
            level: "info".to_string(),
            file: Some(path.clone()),
        };

        for run in 0..2 {
            let log = SessionLog::start(&config).unwrap();
            tracing::info!("run {}", run);
            log.finish().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("run 0"));
        assert!(content.contains("run 1"));
    }

    #[test]
    fn test_unwritable_file_is_an_error() {
        let config = LoggingConfig {
            level: "info".to_string(),
            file: Some("/nonexistent/dir/session.log".into()),
        };
        assert!(matches!(SessionLog::start(&config), Err(NavError::Io(_))));
    }
}
