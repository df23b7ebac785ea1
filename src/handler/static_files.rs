//! Static file serving module
//!
//! Resolves a request against the serve root and builds the matching file,
//! directory, redirect or error response.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, conditional, path::translate_path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Why a path could not be served
#[derive(Debug, Error)]
pub enum FileError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    Forbidden(PathBuf),

    #[error("outside of serve root: {}", .0.display())]
    OutsideRoot(PathBuf),

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classify an I/O error raised while accessing `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::Forbidden(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Map the error onto the response the client sees
    pub fn into_response(self, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
        match self {
            Self::NotFound(_) => http::build_404_response(is_head),
            Self::Forbidden(_) => http::build_403_response(is_head),
            Self::OutsideRoot(resolved) => {
                logger::log_warning(&format!(
                    "Path traversal attempt blocked: {} -> {}",
                    request_path,
                    resolved.display()
                ));
                http::build_404_response(is_head)
            }
            err @ Self::Io { .. } => {
                logger::log_error(&err.to_string());
                http::build_404_response(is_head)
            }
        }
    }
}

/// Serve whatever the request path names below the serve root
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve_and_serve(ctx, state).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(ctx.path, ctx.is_head),
    }
}

async fn resolve_and_serve(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, FileError> {
    let translated = translate_path(&state.root, ctx.path);
    let file_path = translated.fs_path;

    // Follows symlinks, so the root check below sees the real target
    let metadata = fs::metadata(&file_path)
        .await
        .map_err(|e| FileError::from_io(&file_path, e))?;
    ensure_under_root(&file_path, &state.root).await?;

    if metadata.is_dir() {
        if !translated.trailing_slash {
            return Ok(http::build_301_response(&directory_location(ctx)));
        }
        return serve_directory(ctx, state, &file_path).await;
    }

    // "file.txt/" never names a file
    if translated.trailing_slash {
        return Err(FileError::NotFound(file_path));
    }

    serve_file(ctx, state, &file_path).await
}

/// Index file if one exists, otherwise a generated listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Result<Response<Full<Bytes>>, FileError> {
    if let Some(index_path) = find_index_file(dir, &state.config.files.index_files).await {
        ensure_under_root(&index_path, &state.root).await?;
        return serve_file(ctx, state, &index_path).await;
    }

    if !state.config.files.directory_listing {
        return Err(FileError::NotFound(dir.to_path_buf()));
    }

    let html = listing::render_listing(dir, ctx.path).await?;
    Ok(http::response::build_html_response(html, ctx.is_head))
}

/// First configured index file that exists as a regular file
pub async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for index_file in index_files {
        let candidate = dir.join(index_file);
        if let Ok(meta) = fs::metadata(&candidate).await {
            if meta.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Serve a single regular file
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    file_path: &Path,
) -> Result<Response<Full<Bytes>>, FileError> {
    let (content, modified) = load_file(file_path).await?;
    let last_modified = modified.map(conditional::format_http_date);

    if let (Some(mtime), Some(date)) = (modified, last_modified.as_deref()) {
        if conditional::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.if_none_match.as_deref(),
            mtime,
        ) {
            return Ok(http::build_304_response(date));
        }
    }

    let content_type = state.mime.for_path(file_path);
    Ok(http::response::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.as_deref(),
        ctx.is_head,
    ))
}

/// Read a file and its modification time
pub async fn load_file(
    file_path: &Path,
) -> Result<(Vec<u8>, Option<std::time::SystemTime>), FileError> {
    let content = fs::read(file_path)
        .await
        .map_err(|e| FileError::from_io(file_path, e))?;
    let modified = fs::metadata(file_path)
        .await
        .ok()
        .and_then(|m| m.modified().ok());
    Ok((content, modified))
}

/// Reject paths whose real location is outside the serve root
async fn ensure_under_root(path: &Path, root: &Path) -> Result<(), FileError> {
    let canonical = fs::canonicalize(path)
        .await
        .map_err(|e| FileError::from_io(path, e))?;
    if canonical.starts_with(root) {
        Ok(())
    } else {
        Err(FileError::OutsideRoot(canonical))
    }
}

/// Request path with a trailing slash added, query preserved.
///
/// Leading slashes collapse to one: `//host/` in `Location` would send the
/// client to another host.
fn directory_location(ctx: &RequestContext<'_>) -> String {
    let path = format!("/{}/", ctx.path.trim_start_matches('/'));
    match ctx.query {
        Some(query) => format!("{path}?{query}"),
        None => path,
    }
}
