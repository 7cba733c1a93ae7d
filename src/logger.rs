//! Line-oriented session log file.
//!
//! A [`LineLogger`] creates its file as soon as it is constructed and then
//! appends one record per [`LineLogger::log`] call, flushing after every
//! line. Failing to create the file never reaches the caller: the session
//! simply goes inert and every later call is a no-op. A session that never
//! wrote a record removes its (empty) file on teardown.

use crate::config::LoggerConfig;
use crate::error::{LogError, Result};
use crate::timestamp;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Append-only log file owned by a single caller.
///
/// Mutating methods take `&mut self`; share a session between threads by
/// wrapping it in a `Mutex`.
pub struct LineLogger {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    open: bool,
    open_error: Option<LogError>,
    suppress_timestamp: bool,
    records: u64,
    finished: bool,
}

impl LineLogger {
    /// Open a session writing to `<prefix>[timestamp].<file_type>`
    pub fn new(prefix: impl AsRef<Path>, file_type: &str, skip_timestamp: bool) -> Self {
        let config = LoggerConfig::new(prefix.as_ref())
            .file_type(file_type)
            .skip_timestamp(skip_timestamp);
        Self::from_config(&config)
    }

    /// Open a timestamped `.txt` session
    pub fn with_prefix(prefix: impl AsRef<Path>) -> Self {
        Self::from_config(&LoggerConfig::new(prefix.as_ref()))
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        let path = config.file_path();

        let (writer, open_error) = match File::create(&path) {
            Ok(file) => {
                debug!("Opened log file {}", path.display());
                (Some(BufWriter::new(file)), None)
            }
            Err(source) => {
                warn!("Could not create log file {}: {}", path.display(), source);
                let err = LogError::Open {
                    path: path.clone(),
                    source,
                };
                (None, Some(err))
            }
        };

        Self {
            open: writer.is_some(),
            writer,
            path,
            open_error,
            suppress_timestamp: config.skip_timestamp,
            records: 0,
            finished: false,
        }
    }

    /// Path of the log file, fixed at construction
    pub fn file_path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was created. An inert session stays inert.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Why the file could not be created, if it could not
    pub fn open_error(&self) -> Option<&LogError> {
        self.open_error.as_ref()
    }

    /// Number of records written so far
    pub fn record_count(&self) -> u64 {
        self.records
    }

    pub fn timestamps_suppressed(&self) -> bool {
        self.suppress_timestamp
    }

    /// Set timestamp suppression, returning the previous setting
    pub fn set_timestamp_suppression(&mut self, value: bool) -> bool {
        std::mem::replace(&mut self.suppress_timestamp, value)
    }

    /// Run `f` with timestamp suppression set to `value`, then put the
    /// previous setting back (also when `f` panics).
    pub fn with_timestamp_suppression<R>(
        &mut self,
        value: bool,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let previous = self.set_timestamp_suppression(value);
        let guard = SuppressionGuard {
            logger: self,
            previous,
        };
        f(&mut *guard.logger)
    }

    /// Append a record. Write failures are reported through `tracing`
    /// and otherwise ignored.
    pub fn log(&mut self, message: &str) {
        if let Err(err) = self.try_log(message) {
            warn!("Dropped log record: {}", err);
        }
    }

    /// Append a record, surfacing write failures.
    ///
    /// An inert session returns `Ok(())` without touching the filesystem.
    pub fn try_log(&mut self, message: &str) -> Result<()> {
        if !self.open {
            return Ok(());
        }

        let line = if self.suppress_timestamp {
            message.to_string()
        } else {
            timestamp::stamped(message, &Local::now())
        };

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LogError::Closed(self.path.clone()))?;

        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })?;

        self.records += 1;
        Ok(())
    }

    pub(crate) fn take_writer(&mut self) -> Option<BufWriter<File>> {
        self.writer.take()
    }

    pub(crate) fn set_writer(&mut self, writer: BufWriter<File>) {
        self.writer = Some(writer);
    }

    /// Close the file now, deleting it if nothing was logged
    pub fn close(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if !self.open {
            return;
        }

        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }

        if self.records == 0 {
            match fs::remove_file(&self.path) {
                Ok(()) => debug!("Removed empty log file {}", self.path.display()),
                Err(e) => debug!("Could not remove empty log file {}: {}", self.path.display(), e),
            }
        } else {
            debug!(
                "Closed log file {} ({} records)",
                self.path.display(),
                self.records
            );
        }
    }
}

impl Drop for LineLogger {
    fn drop(&mut self) {
        self.finish();
    }
}

struct SuppressionGuard<'a> {
    logger: &'a mut LineLogger,
    previous: bool,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.logger.suppress_timestamp = self.previous;
    }
}
