use crate::error::{LogError, Result};
use crate::logger::LineLogger;
use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Opens a block of copied file contents
pub const CONTENTS_BANNER: &str = "--- Contents of: ";

/// Closes a block of copied file contents
pub const END_BANNER: &str = "---------- End of file ----------";

/// Written in place of a file that could not be read
pub const READ_ERROR_LINE: &str = "Error in reading file.  File NOT read.";

impl LineLogger {
    /// Log `message`, then copy every line of `source` into the log
    /// between banner lines. Copied lines and the closing banner carry no
    /// timestamp.
    ///
    /// If `source` cannot be read a single error line is written instead;
    /// lines copied before a read error stay in the log.
    pub fn log_file_contents(&mut self, message: &str, source: impl AsRef<Path>) {
        let source = source.as_ref();

        self.log(message);
        self.log(&format!("{}{}", CONTENTS_BANNER, source.display()));

        self.with_timestamp_suppression(true, |logger| {
            if let Err(err) = logger.copy_lines(source) {
                warn!("{}", err);
                logger.log(READ_ERROR_LINE);
            }
            logger.log(END_BANNER);
        });
    }

    fn copy_lines(&mut self, source: &Path) -> Result<()> {
        let read_error = |err| LogError::Read {
            path: source.to_path_buf(),
            source: err,
        };

        // Invalid UTF-8 is replaced, not treated as a read failure
        let mut reader = BufReader::new(File::open(source).map_err(read_error)?);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).map_err(read_error)? == 0 {
                break;
            }
            if buf.ends_with(b"\n") {
                buf.pop();
                if buf.ends_with(b"\r") {
                    buf.pop();
                }
            }
            self.log(&String::from_utf8_lossy(&buf));
        }

        Ok(())
    }

    /// Everything logged so far, framed by banner lines.
    ///
    /// The output file is closed, read back and reopened for appending.
    /// On failure the sentinel `" >>> Error in File: <path> <<<"` is
    /// returned and the session may be left without a writer.
    pub fn contents(&mut self) -> String {
        match self.try_contents() {
            Ok(text) => text,
            Err(err) => {
                warn!("{:#}", err);
                format!(" >>> Error in File: {} <<<", self.file_path().display())
            }
        }
    }

    /// Like [`LineLogger::contents`], but returns the failure instead of
    /// the sentinel string.
    pub fn try_contents(&mut self) -> anyhow::Result<String> {
        if !self.is_open() {
            return Err(LogError::Inert.into());
        }

        let path = self.file_path().to_path_buf();

        let mut writer = self
            .take_writer()
            .ok_or_else(|| LogError::Closed(path.clone()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", path.display()))?;
        drop(writer);

        let file = File::open(&path)
            .with_context(|| format!("Failed to open {} for reading", path.display()))?;

        let mut text = format!("\n{}{}\n", CONTENTS_BANNER, path.display());
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str(END_BANNER);
        text.push('\n');

        let file = OpenOptions::new()
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to reopen {} for appending", path.display()))?;
        self.set_writer(BufWriter::new(file));

        Ok(text)
    }
}
