//! Static file HTTP server.
//!
//! Serves a directory over plain HTTP/1.1 with a configurable extension map
//! (`.shtml` and `.wasm` mapped out of the box), directory listings, and an
//! optional switch for cross-origin isolation headers.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
