//! Request handler module
//!
//! Responsible for request dispatch and static file serving.

pub mod listing;
pub mod router;
pub mod static_files;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main entry point
pub use router::handle_request;
