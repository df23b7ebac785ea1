//! Request path translation module
//!
//! Turns the path component of a request URI into a filesystem path below
//! the serve root, plus the escaping helpers the directory listing needs.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Request path mapped onto the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    /// Root joined with the normalized request segments
    pub fs_path: PathBuf,
    /// Whether the request path ended with `/`
    pub trailing_slash: bool,
}

/// Map a request path onto `root`.
///
/// The path is percent-decoded and then normalized segment by segment:
/// empty and `.` segments vanish, `..` pops the previous segment and is
/// ignored at the top. Segments carrying a backslash or NUL are dropped.
/// The result therefore never names anything above `root` lexically;
/// symlinks are checked separately after canonicalization.
///
/// # Examples
/// ```
/// use static_dev_server::http::path::translate_path;
/// use std::path::Path;
///
/// let t = translate_path(Path::new("/srv"), "/../../etc/passwd");
/// assert_eq!(t.fs_path, Path::new("/srv/etc/passwd"));
/// ```
pub fn translate_path(root: &Path, request_path: &str) -> TranslatedPath {
    // Query and fragment never reach the filesystem
    let raw = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let trailing_slash = raw.trim_end().ends_with('/');
    // Bytes, not text: file names need not be UTF-8
    let decoded = percent_decode_bytes(raw.as_bytes());

    let mut segments: Vec<&[u8]> = Vec::new();
    for segment in decoded.split(|&b| b == b'/') {
        match segment {
            b"" | b"." => {}
            b".." => {
                segments.pop();
            }
            s if s.contains(&b'\\') || s.contains(&0) => {}
            s => segments.push(s),
        }
    }

    let mut fs_path = root.to_path_buf();
    fs_path.extend(segments.into_iter().map(os_from_bytes));
    TranslatedPath {
        fs_path,
        trailing_slash,
    }
}

/// Decode `%XX` escapes into raw bytes. Invalid escapes are kept literally.
pub fn percent_decode_bytes(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' && i + 2 < input.len() {
            if let (Some(hi), Some(lo)) = (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(input[i]);
        i += 1;
    }
    out
}

/// Decode `%XX` escapes for display, invalid UTF-8 becomes U+FFFD
pub fn percent_decode(input: &str) -> String {
    String::from_utf8_lossy(&percent_decode_bytes(input.as_bytes())).into_owned()
}

#[cfg(unix)]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Raw bytes of a file name as the OS stores it (lossy off unix)
#[cfg(unix)]
pub fn os_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
pub fn os_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a single path segment for use in an `href`.
///
/// Unreserved characters and a few path-safe ones pass through.
pub fn percent_encode_segment(segment: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(segment.len());
    for &b in segment {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'/' => out.push(char::from(b)),
            _ => {
                out.push('%');
                out.push(char::from(HEX[usize::from(b >> 4)]));
                out.push(char::from(HEX[usize::from(b & 0x0f)]));
            }
        }
    }
    out
}

/// Escape text for inclusion in HTML content or attribute values
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/www")
    }

    #[test]
    fn test_plain_path() {
        let t = translate_path(&root(), "/static/app.js");
        assert_eq!(t.fs_path, Path::new("/srv/www/static/app.js"));
        assert!(!t.trailing_slash);
    }

    #[test]
    fn test_root_and_trailing_slash() {
        let t = translate_path(&root(), "/");
        assert_eq!(t.fs_path, root());
        assert!(t.trailing_slash);

        let t = translate_path(&root(), "/docs/");
        assert_eq!(t.fs_path, Path::new("/srv/www/docs"));
        assert!(t.trailing_slash);
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let t = translate_path(&root(), "/index.html?v=3#top");
        assert_eq!(t.fs_path, Path::new("/srv/www/index.html"));
        assert!(!t.trailing_slash);

        let t = translate_path(&root(), "/dir/?x=1");
        assert!(t.trailing_slash);
    }

    #[test]
    fn test_traversal_stays_under_root() {
        for p in [
            "/../../etc/passwd",
            "/a/../../../etc/passwd",
            "/%2e%2e/%2e%2e/etc/passwd",
            "/..%2f..%2fetc/passwd",
        ] {
            let t = translate_path(&root(), p);
            assert_eq!(t.fs_path, Path::new("/srv/www/etc/passwd"), "path {p}");
        }
    }

    #[test]
    fn test_inner_dotdot_resolves() {
        let t = translate_path(&root(), "/a/b/../c/./d");
        assert_eq!(t.fs_path, Path::new("/srv/www/a/c/d"));
    }

    #[test]
    fn test_suspicious_segments_dropped() {
        let t = translate_path(&root(), "/a%5C..%5Cb/c");
        assert_eq!(t.fs_path, Path::new("/srv/www/c"));
        let t = translate_path(&root(), "/a%00b/c");
        assert_eq!(t.fs_path, Path::new("/srv/www/c"));
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("%E4%BD%A0%E5%A5%BD"), "你好");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz%4"), "%zz%4");
        assert_eq!(percent_decode("a%2Fb"), "a/b");
        assert_eq!(percent_decode_bytes(b"caf%E9"), b"caf\xe9");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_kept_byte_exact() {
        use std::os::unix::ffi::OsStrExt;
        let t = translate_path(&root(), "/dl/caf%E9.txt");
        assert_eq!(
            t.fs_path,
            root().join("dl").join(OsStr::from_bytes(b"caf\xe9.txt"))
        );
        assert_eq!(os_bytes(t.fs_path.file_name().unwrap()), &b"caf\xe9.txt"[..]);
    }

    #[test]
    fn test_percent_encode_segment() {
        assert_eq!(percent_encode_segment(b"my file.txt"), "my%20file.txt");
        assert_eq!(percent_encode_segment(b"sub/"), "sub/");
        assert_eq!(percent_encode_segment(b"a&b#c"), "a%26b%23c");
        assert_eq!(percent_encode_segment("你".as_bytes()), "%E4%BD%A0");
        assert_eq!(percent_encode_segment(b"caf\xe9"), "caf%E9");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;"
        );
    }
}
