//! Error type definitions.
//!
//! This module defines the errors raised while building hosts, decoding
//! classification codes, talking to denylist services and initializing
//! shared resources.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// Error reading a local hosts file.
    #[error("Hosts file error: {0}")]
    HostsFileError(String),
}

/// A value could not be parsed as any supported host type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid host '{value}': {reason}")]
pub struct InvalidHostError {
    /// The rejected input
    pub value: String,
    /// Why the last constructor rejected it
    pub reason: String,
}

impl InvalidHostError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// A source returned a code missing from the configured classification table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown classification code: {code}")]
pub struct UnknownCodeError {
    pub code: u32,
}

/// Transport-level failures reported by the HTTP collaborators.
///
/// The variants are kept distinct so the redirect resolver can decide which
/// failures merely truncate a redirect chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// TCP/TLS connection could not be established.
    #[error("connection failed for {0}")]
    Connection(String),

    /// The request did not complete in time.
    #[error("request timed out for {0}")]
    Timeout(String),

    /// The URL uses a scheme the transport cannot speak.
    #[error("unsupported URL scheme: {0}")]
    InvalidSchema(String),

    /// The URL could not be turned into a request.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP status.
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Anything else (body decoding, redirect loops, ...).
    #[error("HTTP request error: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether this failure ends a redirect chain while keeping the pending location.
    pub fn keeps_pending_location(&self) -> bool {
        matches!(
            self,
            TransportError::Connection(_)
                | TransportError::Timeout(_)
                | TransportError::InvalidSchema(_)
        )
    }
}

/// Errors surfaced by host lists, URL testers and the redirect resolver.
#[derive(Error, Debug)]
pub enum DenylistError {
    /// Input cannot be parsed as any supported host type.
    #[error(transparent)]
    InvalidHost(#[from] InvalidHostError),

    /// Input fails URL syntax validation.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// A source answered with a code the configured table does not know.
    #[error(transparent)]
    UnknownCode(#[from] UnknownCodeError),

    /// An HTTP service rejected the configured credential.
    #[error("{service} rejected the configured API key or client id")]
    UnauthorizedApiKey { service: String },

    /// HTTP transport failure outside the redirect resolver.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// DNS failure other than "name does not exist" or a timeout.
    #[error("DNS query for {name} failed: {detail}")]
    Dns { name: String, detail: String },

    /// A source answered in a format we could not parse.
    #[error("malformed response from {source_id}: {detail}")]
    MalformedResponse { source_id: String, detail: String },
}

impl DenylistError {
    pub fn invalid_url(url: impl Into<String>) -> Self {
        DenylistError::InvalidUrl { url: url.into() }
    }
}
