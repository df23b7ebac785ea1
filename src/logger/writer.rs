//! Log destinations
//!
//! Access and error lines go to stderr unless a file is configured for the
//! stream, in which case they are appended to it.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Destinations chosen at startup, fixed for the life of the process
static SINKS: OnceLock<Sinks> = OnceLock::new();

/// Where one log stream ends up
enum Sink {
    Stderr,
    /// Append-only file, one line per record
    File(Mutex<File>),
}

impl Sink {
    fn for_path(path: Option<&str>) -> io::Result<Self> {
        path.map_or(Ok(Self::Stderr), |p| {
            append_to(Path::new(p)).map(|f| Self::File(Mutex::new(f)))
        })
    }

    fn line(&self, record: &str) {
        match self {
            Self::Stderr => eprintln!("{record}"),
            Self::File(file) => {
                // A poisoned lock or full disk must not take a request down
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{record}");
                }
            }
        }
    }
}

/// The access and error streams
pub struct Sinks {
    access: Sink,
    error: Sink,
}

impl Sinks {
    fn open(access_path: Option<&str>, error_path: Option<&str>) -> io::Result<Self> {
        let access = Sink::for_path(access_path)?;
        let error = Sink::for_path(error_path)?;
        Ok(Self { access, error })
    }

    pub fn access(&self, record: &str) {
        self.access.line(record);
    }

    pub fn error(&self, record: &str) {
        self.error.line(record);
    }
}

/// Open `path` for appending, creating it and any missing parent directories
fn append_to(path: &Path) -> io::Result<File> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)?,
        _ => {}
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the process-wide sinks.
///
/// Fails when a configured file cannot be opened or when called twice.
pub fn init(access_path: Option<&str>, error_path: Option<&str>) -> io::Result<()> {
    let sinks = Sinks::open(access_path, error_path)?;
    SINKS
        .set(sinks)
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "log sinks already installed"))
}

/// Installed sinks, `None` until [`init`] has run
pub fn get() -> Option<&'static Sinks> {
    SINKS.get()
}
