//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file
//! resolution: content types, path translation, date handling and response
//! builders.

pub mod conditional;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use response::{
    build_301_response, build_304_response, build_403_response, build_404_response,
    build_501_response,
};
