// Configuration module entry point
// Layered configuration loading and the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, HeadersConfig, LoggingConfig, ServerConfig};

/// Default config file base name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "static-server";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Load configuration from the default file name
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Sources in increasing priority: built-in defaults, the optional file,
    /// then `STATIC_SERVER_*` environment variables (`__` separates sections).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("STATIC_SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        let ip: std::net::IpAddr = host
            .parse()
            .map_err(|e| format!("Invalid address '{}': {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_server() {
        let cfg = Config::default();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.files.root, ".");
        assert_eq!(cfg.files.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.files.directory_listing);
        assert!(cfg.files.mime_types.is_empty());
        assert!(!cfg.headers.cross_origin_isolation);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let cfg = Config::load_from("definitely-missing-config-file").unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert!(!cfg.headers.cross_origin_isolation);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8000".parse().unwrap()
        );

        let mut cfg = Config::default();
        cfg.server.host = "[::]".to_string();
        cfg.server.port = 9000;
        assert_eq!(cfg.get_socket_addr().unwrap(), "[::]:9000".parse().unwrap());

        cfg.server.host = "not-an-ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_state_rejects_missing_root() {
        let mut cfg = Config::default();
        cfg.files.root = "/definitely/not/a/real/dir".to_string();
        assert!(AppState::new(&cfg).is_err());
    }

    #[test]
    fn test_state_applies_configured_mime_types() {
        let mut cfg = Config::default();
        cfg.files
            .mime_types
            .insert(".data".to_string(), "application/x-test".to_string());
        let state = AppState::new(&cfg).unwrap();
        assert_eq!(state.mime.lookup(Some("data")), "application/x-test");
        assert_eq!(state.mime.lookup(Some("wasm")), "application/wasm");
        assert!(state.root.is_absolute());
    }
}
