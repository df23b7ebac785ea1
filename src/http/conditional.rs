//! HTTP conditional request module
//!
//! Provides `Last-Modified` generation and `If-Modified-Since` handling.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::time::SystemTime;

/// IMF-fixdate, the preferred HTTP date format (RFC 7231 7.1.1.1)
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 format
const RFC850_DATE: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// Obsolete ANSI C `asctime()` format
const ASCTIME_DATE: &str = "%a %b %e %H:%M:%S %Y";

/// Format a timestamp as an HTTP date
///
/// # Examples
/// ```
/// use static_dev_server::http::conditional::format_http_date;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let t = UNIX_EPOCH + Duration::from_secs(784_111_777);
/// assert_eq!(format_http_date(t), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}

/// Parse an HTTP date in any of the three formats HTTP/1.1 allows
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    [RFC850_DATE, ASCTIME_DATE]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Check whether the client's copy is still current
///
/// `If-Modified-Since` is ignored when `If-None-Match` is present or when the
/// date does not parse. Sub-second precision of the modification time is
/// dropped since HTTP dates carry whole seconds.
///
/// # Returns
/// Returns true if the server should answer 304
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    if_none_match: Option<&str>,
    modified: SystemTime,
) -> bool {
    if if_none_match.is_some() {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample_time() -> SystemTime {
        // 1994-11-06T08:49:37Z
        UNIX_EPOCH + Duration::from_secs(784_111_777)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(
            format_http_date(sample_time()),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn test_parse_all_formats() {
        let expected = DateTime::<Utc>::from(sample_time());
        assert_eq!(
            parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"),
            Some(expected)
        );
        assert_eq!(
            parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"),
            Some(expected)
        );
        assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994"), Some(expected));
        assert_eq!(parse_http_date("yesterday"), None);
    }

    #[test]
    fn test_not_modified() {
        let modified = sample_time() + Duration::from_millis(400);
        let same = "Sun, 06 Nov 1994 08:49:37 GMT";
        let later = "Sun, 06 Nov 1994 09:00:00 GMT";
        let earlier = "Sun, 06 Nov 1994 08:00:00 GMT";

        assert!(is_not_modified(Some(same), None, modified));
        assert!(is_not_modified(Some(later), None, modified));
        assert!(!is_not_modified(Some(earlier), None, modified));
        assert!(!is_not_modified(None, None, modified));
        assert!(!is_not_modified(Some("garbage"), None, modified));
    }

    #[test]
    fn test_if_none_match_disables_date_check() {
        let later = "Sun, 06 Nov 1994 09:00:00 GMT";
        assert!(!is_not_modified(Some(later), Some("\"abc\""), sample_time()));
    }
}
