//! HTTP collaborators.
//!
//! The services and the redirect resolver never talk to `reqwest` directly.
//! They go through two small traits so tests can substitute scripted fakes:
//! - `HttpClient` for the GET/POST calls made by reputation services
//! - `RedirectSession` for the HEAD request and redirect walk of a URL
//!
//! `ReqwestClient` and `ReqwestSession` are the production implementations.

mod redirects;
mod request;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use redirects::{is_redirect_status, resolve_location, ReqwestSession};
pub use request::ReqwestClient;

use crate::error_handling::TransportError;

/// A received HTTP response, reduced to what the crate inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// URL the response was received from.
    pub url: String,
    pub status: u16,
    headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header; names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw value of the `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    pub fn is_redirect(&self) -> bool {
        is_redirect_status(self.status)
    }
}

/// Plain request/response HTTP access used by the reputation services.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    fn post(&self, url: &str, body: String) -> Result<HttpResponse, TransportError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body)
    }
}

/// Responses produced while walking a redirect chain.
pub type RedirectChain<'a> = Box<dyn Iterator<Item = Result<HttpResponse, TransportError>> + 'a>;

/// Redirect-aware session.
pub trait RedirectSession {
    /// Issues a HEAD request without following redirects.
    fn head(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// Follows the redirects of `response`, one response per hop.
    ///
    /// The sequence is lazy; a failed hop is yielded as `Err` and ends it.
    fn resolve_redirects<'a>(&'a self, response: &HttpResponse) -> RedirectChain<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let response = HttpResponse::new("http://a.com", 301, "")
            .with_header("Location", "http://b.com");
        assert_eq!(response.location(), Some("http://b.com"));
        assert_eq!(response.header("LOCATION"), Some("http://b.com"));
        assert!(response.header("content-type").is_none());
    }

    #[test]
    fn test_is_redirect() {
        assert!(HttpResponse::new("http://a.com", 302, "").is_redirect());
        assert!(HttpResponse::new("http://a.com", 308, "").is_redirect());
        assert!(!HttpResponse::new("http://a.com", 200, "").is_redirect());
        assert!(!HttpResponse::new("http://a.com", 304, "").is_redirect());
    }
}
