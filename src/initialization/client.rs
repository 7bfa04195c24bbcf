//! HTTP client initialization.
//!
//! This module provides functions to initialize the blocking HTTP clients
//! used by the reputation services and the redirect resolver.

use std::time::Duration;

use crate::config::Config;
use crate::fetch::{ReqwestClient, ReqwestSession};

/// Initializes the HTTP client used by the HTTP-backed reputation services.
///
/// Creates a `ReqwestClient` configured with:
/// - User-Agent header from options
/// - Timeout from options
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<ReqwestClient, reqwest::Error> {
    ReqwestClient::new(
        Duration::from_secs(config.timeout_seconds),
        &config.user_agent,
    )
}

/// Initializes the session used for redirect resolution.
///
/// Redirects are disabled on the underlying client so every hop of the
/// chain can be observed.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_session(config: &Config) -> Result<ReqwestSession, reqwest::Error> {
    ReqwestSession::new(
        Duration::from_secs(config.timeout_seconds),
        &config.user_agent,
    )
}
