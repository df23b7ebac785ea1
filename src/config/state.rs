// Application state module
// Immutable per-process state shared by every connection

use std::io;
use std::path::PathBuf;

use super::types::Config;
use crate::http::mime::MimeTable;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical serve root, every served path must stay below it
    pub root: PathBuf,
    /// Extension map consulted for every response
    pub mime: MimeTable,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// Fails when the serve root does not exist or cannot be resolved.
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = std::fs::canonicalize(&config.files.root).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("serve root '{}' is not accessible: {e}", config.files.root),
            )
        })?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("serve root '{}' is not a directory", root.display()),
            ));
        }

        let mut mime = MimeTable::standard();
        mime.extend(&config.files.mime_types);

        Ok(Self {
            config: config.clone(),
            root,
            mime,
        })
    }

    pub const fn cross_origin_isolation(&self) -> bool {
        self.config.headers.cross_origin_isolation
    }
}
