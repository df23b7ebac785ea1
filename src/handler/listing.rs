//! Directory listing module
//!
//! Generates the HTML index page shown for directories without an index file.

use crate::handler::static_files::FileError;
use crate::http::path::{html_escape, os_bytes, percent_decode, percent_encode_segment};
use std::ffi::OsStr;
use std::path::Path;
use tokio::fs;

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Text shown to the user
    pub display_name: String,
    /// Percent-encoded relative link, built from the raw name bytes
    pub href: String,
}

impl ListingEntry {
    /// Directories get a `/` on both name and link; symlinks show `@`
    pub fn new(name: &OsStr, is_dir: bool, is_symlink: bool) -> Self {
        let shown = name.to_string_lossy();
        let mut display_name = shown.to_string();
        let mut href = percent_encode_segment(&os_bytes(name));
        if is_dir {
            display_name.push('/');
            href.push('/');
        }
        if is_symlink {
            display_name = format!("{shown}@");
        }
        Self { display_name, href }
    }
}

/// Read `dir` and render its listing page.
///
/// `request_path` is the raw path the client asked for, shown (decoded and
/// escaped) in the page title.
pub async fn render_listing(dir: &Path, request_path: &str) -> Result<String, FileError> {
    let entries = read_entries(dir).await?;
    Ok(render_html(request_path, &entries))
}

/// Collect entries sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> Result<Vec<ListingEntry>, FileError> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|e| FileError::from_io(dir, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| FileError::from_io(dir, e))?
    {
        let name = entry.file_name();
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // Follows links, so a link to a directory is listed as one
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry::new(&name, is_dir, is_symlink));
    }

    entries.sort_by_cached_key(|e| e.display_name.to_lowercase());
    Ok(entries)
}

/// Render the listing page
pub fn render_html(request_path: &str, entries: &[ListingEntry]) -> String {
    let path_only = request_path.split(['?', '#']).next().unwrap_or_default();
    let title = format!(
        "Directory listing for {}",
        html_escape(&percent_decode(path_only))
    );

    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            html_escape(&entry.href),
            html_escape(&entry.display_name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::TempDir;

    #[test]
    fn test_entry_suffixes() {
        assert_eq!(
            ListingEntry::new(OsStr::new("a b.txt"), false, false),
            ListingEntry {
                display_name: "a b.txt".to_string(),
                href: "a%20b.txt".to_string()
            }
        );
        let dir = ListingEntry::new(OsStr::new("pkg"), true, false);
        assert_eq!(dir.display_name, "pkg/");
        assert_eq!(dir.href, "pkg/");
        let link = ListingEntry::new(OsStr::new("latest"), true, true);
        assert_eq!(link.display_name, "latest@");
        assert_eq!(link.href, "latest/");
    }

    #[test]
    fn test_render_escapes_names() {
        let entries = vec![
            ListingEntry::new(OsStr::new("a b.txt"), false, false),
            ListingEntry::new(OsStr::new("<x>&.html"), false, false),
        ];
        let html = render_html("/my%20dir/", &entries);
        assert!(html.contains("<title>Directory listing for /my dir/</title>"));
        assert!(html.contains(r#"<a href="a%20b.txt">a b.txt</a>"#));
        assert!(html.contains(r#"<a href="%3Cx%3E%26.html">&lt;x&gt;&amp;.html</a>"#));
    }

    #[tokio::test]
    async fn test_read_entries_sorted_with_dirs() {
        let dir = TempDir::new("listing");
        dir.write("beta.txt", b"");
        dir.write("Alpha.txt", b"");
        dir.mkdir("gamma");
        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha.txt", "beta.txt", "gamma/"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_links_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;
        let entry = ListingEntry::new(OsStr::from_bytes(b"caf\xe9.txt"), false, false);
        assert_eq!(entry.href, "caf%E9.txt");
        assert_eq!(entry.display_name, "caf\u{fffd}.txt");
    }

    #[tokio::test]
    async fn test_missing_dir_is_not_found() {
        let dir = TempDir::new("listing-missing");
        let result = read_entries(&dir.path().join("absent")).await;
        assert!(matches!(result, Err(FileError::NotFound(_))));
    }
}
