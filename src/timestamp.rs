use chrono::{DateTime, Local, NaiveDateTime};

/// Stamp baked into generated file names. The trailing dot separates it
/// from the file type.
pub const FILE_NAME_FORMAT: &str = "%Y_%m_%d_%H_%M_%S.";

/// Stamp written in front of timestamped records.
pub const LINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn file_name_stamp(at: &DateTime<Local>) -> String {
    at.format(FILE_NAME_FORMAT).to_string()
}

pub fn line_stamp(at: &DateTime<Local>) -> String {
    at.format(LINE_FORMAT).to_string()
}

/// Parse the stamp part of a timestamped record back into a local date-time.
pub fn parse_line_stamp(stamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp, LINE_FORMAT).ok()
}

/// Build a timestamped record: `<stamp>: <message>`.
pub(crate) fn stamped(message: &str, at: &DateTime<Local>) -> String {
    format!("{}: {}", line_stamp(at), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> DateTime<Local> {
        Local.with_ymd_and_hms(2016, 12, 14, 9, 5, 7).unwrap()
    }

    #[test]
    fn test_file_name_stamp_has_trailing_dot() {
        assert_eq!(file_name_stamp(&fixed()), "2016_12_14_09_05_07.");
    }

    #[test]
    fn test_line_stamp_round_trips_through_parse() {
        let stamp = line_stamp(&fixed());
        assert_eq!(stamp, "2016-12-14 09:05:07");
        assert_eq!(parse_line_stamp(&stamp), Some(fixed().naive_local()));
    }

    #[test]
    fn test_stamped_record_shape() {
        assert_eq!(stamped("hello", &fixed()), "2016-12-14 09:05:07: hello");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_line_stamp("not a date").is_none());
        assert!(parse_line_stamp("2016_12_14_09_05_07.").is_none());
    }
}
