//! Request handler module
//!
//! Adapts hyper requests to the wiki: route validation, form body reading,
//! dispatch and access logging.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
