//! Application initialization and resource setup.
//!
//! - Logger
//! - HTTP clients for product-details and for redirect checks

mod client;
mod logger;

// Re-export public API
pub use client::{init_client, init_redirect_client};
pub use logger::init_logger_with;
