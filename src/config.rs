use crate::logger::LineLogger;
use crate::timestamp;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for opening a log session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Start of the file name, may include directories (e.g. "logs/run_")
    pub prefix: PathBuf,

    /// File extension, without the dot
    #[serde(default = "default_file_type")]
    pub file_type: String,

    /// Use a fixed file name and write records without a timestamp
    #[serde(default)]
    pub skip_timestamp: bool,
}

fn default_file_type() -> String {
    "txt".to_string()
}

impl LoggerConfig {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            file_type: default_file_type(),
            skip_timestamp: false,
        }
    }

    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    pub fn skip_timestamp(mut self, skip: bool) -> Self {
        self.skip_timestamp = skip;
        self
    }

    /// Resolve the log file name against the current local time
    pub fn file_path(&self) -> PathBuf {
        self.file_path_at(&Local::now())
    }

    /// Resolve the log file name against a given instant.
    ///
    /// `<prefix>.<type>` when timestamps are skipped, otherwise
    /// `<prefix><yyyy_MM_dd_HH_mm_ss.><type>`.
    pub fn file_path_at(&self, at: &DateTime<Local>) -> PathBuf {
        let mut name = self.prefix.as_os_str().to_os_string();
        if self.skip_timestamp {
            name.push(".");
        } else {
            name.push(timestamp::file_name_stamp(at));
        }
        name.push(&self.file_type);
        PathBuf::from(name)
    }

    /// Open a session with these parameters
    pub fn open(&self) -> LineLogger {
        LineLogger::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;

    fn fixed() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::new("run_");
        assert_eq!(config.file_type, "txt");
        assert!(!config.skip_timestamp);
    }

    #[test]
    fn test_timestamped_file_path() {
        let config = LoggerConfig::new("logs/run_");
        assert_eq!(
            config.file_path_at(&fixed()),
            Path::new("logs/run_2024_01_02_03_04_05.txt")
        );
    }

    #[test]
    fn test_fixed_file_path() {
        let config = LoggerConfig::new("audit").file_type("log").skip_timestamp(true);
        assert_eq!(config.file_path_at(&fixed()), Path::new("audit.log"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        #[derive(Deserialize)]
        struct Host {
            log: LoggerConfig,
        }

        let host: Host = toml::from_str("[log]\nprefix = \"/var/tmp/app_\"\n").unwrap();
        assert_eq!(host.log.prefix, Path::new("/var/tmp/app_"));
        assert_eq!(host.log.file_type, "txt");
        assert!(!host.log.skip_timestamp);
    }

    #[test]
    fn test_deserialize_overrides() {
        let config: LoggerConfig =
            toml::from_str("prefix = \"trace\"\nfile_type = \"csv\"\nskip_timestamp = true\n")
                .unwrap();
        assert_eq!(config.file_path_at(&fixed()), Path::new("trace.csv"));
    }
}
