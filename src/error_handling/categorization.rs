//! Error categorization.
//!
//! This module maps `reqwest` failures and HTTP status codes onto the
//! transport taxonomy used by the services and the redirect resolver.

use super::types::{DenylistError, TransportError};
use crate::fetch::HttpResponse;

/// Categorizes a `reqwest::Error` into a `TransportError`.
///
/// Builder errors are split by scheme: a request for a URL whose scheme is
/// not http/https is reported as `InvalidSchema`, any other builder failure
/// as `InvalidUrl`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
/// * `url` - The URL the request was made for
pub fn categorize_reqwest_error(error: &reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        };
    }

    if error.is_timeout() {
        TransportError::Timeout(url.to_string())
    } else if error.is_connect() {
        TransportError::Connection(url.to_string())
    } else if error.is_builder() {
        if has_http_scheme(url) {
            TransportError::InvalidUrl(url.to_string())
        } else {
            TransportError::InvalidSchema(url.to_string())
        }
    } else {
        TransportError::Other(format!("{url}: {error}"))
    }
}

fn has_http_scheme(url: &str) -> bool {
    url::Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(true)
}

/// Rejects unsuccessful service responses.
///
/// 401 and 403 mean the service refused our credential; any other status
/// outside 2xx is a transport failure.
pub fn check_service_status(service: &str, response: &HttpResponse) -> Result<(), DenylistError> {
    match response.status {
        200..=299 => Ok(()),
        401 | 403 => Err(DenylistError::UnauthorizedApiKey {
            service: service.to_string(),
        }),
        status => Err(TransportError::Status {
            url: response.url.clone(),
            status,
        }
        .into()),
    }
}
