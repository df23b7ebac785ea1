//! MIME type detection module
//!
//! Maps file extensions to the `Content-Type` sent with a file. Lookups go
//! through a [`MimeTable`], which layers explicit overrides on top of the
//! built-in table below.

use std::collections::HashMap;

/// Sent when no table entry matches
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Overrides every server instance carries on top of the built-in table
pub const STANDARD_OVERRIDES: [(&str, &str); 2] =
    [("shtml", "text/html"), ("wasm", "application/wasm")];

/// Extension map consulted per request.
///
/// Built once at startup and handed to the server state; never mutated
/// while serving.
#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    /// Built-in table plus [`STANDARD_OVERRIDES`]
    pub fn standard() -> Self {
        let mut table = Self::default();
        for (ext, content_type) in STANDARD_OVERRIDES {
            table.insert(ext, content_type);
        }
        table
    }

    /// Add or replace an entry. A leading dot on `ext` is ignored.
    pub fn insert(&mut self, ext: &str, content_type: &str) {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            return;
        }
        self.overrides
            .insert(ext.to_string(), content_type.to_string());
    }

    pub fn extend(&mut self, entries: &HashMap<String, String>) {
        for (ext, content_type) in entries {
            self.insert(ext, content_type);
        }
    }

    /// Content type for an extension (without the dot).
    ///
    /// Tries the exact extension, then its lowercase form, against the
    /// overrides and then the built-in table.
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        let Some(ext) = extension else {
            return DEFAULT_CONTENT_TYPE;
        };

        if let Some(content_type) = self.overrides.get(ext) {
            return content_type;
        }
        let lower = ext.to_ascii_lowercase();
        if let Some(content_type) = self.overrides.get(&lower) {
            return content_type;
        }

        builtin_content_type(&lower).unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Content type for a filesystem path
    pub fn for_path(&self, path: &std::path::Path) -> &str {
        self.lookup(path.extension().and_then(|e| e.to_str()))
    }
}

/// Built-in extension table (lowercase extensions only)
pub fn builtin_content_type(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        // Text
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "txt" | "md" | "py" | "rs" => "text/plain",
        "csv" => "text/csv",
        "xml" => "application/xml",

        // JavaScript/WASM
        "js" | "mjs" => "text/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "webp" => "image/webp",
        "bmp" => "image/bmp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",

        // Audio
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "wav" => "audio/x-wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Archives and documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        _ => return None,
    };
    Some(content_type)
}
