use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LogError>;

/// Failures a log session can run into.
///
/// Only `try_*` methods hand these out; the plain methods map them to
/// silence or a sentinel line.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("could not create log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log session is inert, the file was never opened")]
    Inert,

    #[error("log file {0} is not open for writing")]
    Closed(PathBuf),

    #[error("could not write to log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = LogError::Write {
            path: PathBuf::from("/tmp/run.txt"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/run.txt"));
        assert!(text.contains("disk full"));
    }

    #[test]
    fn test_source_is_chained() {
        use std::error::Error as _;

        let err = LogError::Read {
            path: PathBuf::from("missing.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.source().is_some());
        assert!(LogError::Inert.source().is_none());
    }
}
