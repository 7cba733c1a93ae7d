//! Append-only session log files.
//!
//! ```no_run
//! use linelog::LineLogger;
//!
//! let mut log = LineLogger::with_prefix("logs/import_");
//! log.log("import started");
//! log.log_file_contents("settings in effect", "import.toml");
//! print!("{}", log.contents());
//! log.close();
//! ```

mod config;
mod contents;
mod error;
mod logger;
pub mod timestamp;

pub use config::LoggerConfig;
pub use contents::{CONTENTS_BANNER, END_BANNER, READ_ERROR_LINE};
pub use error::{LogError, Result};
pub use logger::LineLogger;
