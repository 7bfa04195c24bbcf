//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP clients (services and redirect resolution)
//! - DNS resolver
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::{init_client, init_redirect_session};
pub use logger::init_logger_with;
pub use resolver::init_resolver;
