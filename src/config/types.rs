// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub headers: HeadersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Value sent in the `Server` response header
    #[serde(default = "default_server_name")]
    pub server_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: super::DEFAULT_HOST.to_string(),
            port: super::DEFAULT_PORT,
            server_name: default_server_name(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_server_name() -> String {
    concat!("static-dev-server/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Served files configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    /// Serve root, relative paths resolve against the working directory
    #[serde(default = "default_root")]
    pub root: String,
    /// Index files tried in order for directory requests
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    /// Generate an HTML listing for directories without an index file
    #[serde(default = "default_directory_listing")]
    pub directory_listing: bool,
    /// Extra extension -> content type entries, applied last
    #[serde(default)]
    pub mime_types: HashMap<String, String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_root() -> String {
    ".".to_string()
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

#[allow(clippy::missing_const_for_fn)]
fn default_directory_listing() -> bool {
    true
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            index_files: default_index_files(),
            directory_listing: default_directory_listing(),
            mime_types: HashMap::new(),
        }
    }
}

/// Extra response headers
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HeadersConfig {
    /// Send `Cross-Origin-Embedder-Policy: require-corp` and
    /// `Cross-Origin-Opener-Policy: same-origin` on every response.
    ///
    /// Browsers only expose `SharedArrayBuffer` to cross-origin isolated pages.
    #[serde(default)]
    pub cross_origin_isolation: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_access_log")]
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stderr if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: default_access_log(),
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}
