//! HTTP redirect chain walking.
//!
//! The client is built with redirects disabled so every hop is observed:
//! each `Location` is resolved against the URL of the response carrying it
//! and requested with HEAD, up to a maximum number of hops.

use std::time::Duration;

use log::warn;
use reqwest::blocking::Client;
use reqwest::Url;

use super::request::response_head;
use super::{HttpResponse, RedirectChain, RedirectSession};
use crate::config::{MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::{categorize_reqwest_error, TransportError};

/// Returns `true` for the statuses that carry a followable `Location` (301, 302, 303, 307, 308).
pub fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// `RedirectSession` backed by a `reqwest::blocking` client with redirects disabled.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    client: Client,
    max_hops: usize,
}

impl ReqwestSession {
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if the client cannot be built.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self {
            client,
            max_hops: MAX_REDIRECT_HOPS,
        })
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }
}

impl RedirectSession for ReqwestSession {
    fn head(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .head(url)
            .send()
            .map_err(|e| categorize_reqwest_error(&e, url))?;
        Ok(response_head(&response))
    }

    fn resolve_redirects<'a>(&'a self, response: &HttpResponse) -> RedirectChain<'a> {
        let mut current = Some(response.clone());
        let mut hops = 0;

        Box::new(std::iter::from_fn(move || {
            let previous = current.take()?;
            let target = match next_location(&previous) {
                Ok(Some(target)) => target,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };

            if hops >= self.max_hops {
                return Some(Err(TransportError::Other(format!(
                    "exceeded {} redirects starting from {}",
                    self.max_hops, previous.url
                ))));
            }
            hops += 1;

            match self.head(&target) {
                Ok(next) => {
                    current = Some(next.clone());
                    Some(Ok(next))
                }
                Err(e) => Some(Err(e)),
            }
        }))
    }
}

/// Absolute target of a redirect response, or `None` when the chain ends here.
fn next_location(response: &HttpResponse) -> Result<Option<String>, TransportError> {
    if !response.is_redirect() {
        return Ok(None);
    }

    let Some(location) = response.location() else {
        warn!(
            "Redirect status {} for {} but no Location header",
            response.status, response.url
        );
        return Ok(None);
    };

    resolve_location(&response.url, location)
        .map(Some)
        .ok_or_else(|| TransportError::InvalidUrl(location.to_string()))
}

/// Absolute form of a `Location` value. Absolute values are kept verbatim,
/// relative ones are joined against `base`.
pub fn resolve_location(base: &str, location: &str) -> Option<String> {
    if Url::parse(location).is_ok() {
        return Some(location.to_string());
    }
    Url::parse(base)
        .and_then(|base| base.join(location))
        .map(|url| url.to_string())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_redirect_status() {
        for status in [301, 302, 303, 307, 308] {
            assert!(is_redirect_status(status));
        }
        for status in [200, 204, 300, 304, 404, 500] {
            assert!(!is_redirect_status(status));
        }
    }

    #[test]
    fn test_next_location_absolute() {
        let response =
            HttpResponse::new("http://a.com/x", 301, "").with_header("location", "http://b.com/y");
        assert_eq!(
            next_location(&response).unwrap().as_deref(),
            Some("http://b.com/y")
        );
    }

    #[test]
    fn test_next_location_relative_is_joined() {
        let response =
            HttpResponse::new("http://a.com/dir/page", 302, "").with_header("location", "/other");
        assert_eq!(
            next_location(&response).unwrap().as_deref(),
            Some("http://a.com/other")
        );
    }

    #[test]
    fn test_resolve_location() {
        assert_eq!(
            resolve_location("http://a.com/x/y", "z").as_deref(),
            Some("http://a.com/x/z")
        );
        assert_eq!(
            resolve_location("http://a.com/x", "https://b.com").as_deref(),
            Some("https://b.com")
        );
        assert_eq!(resolve_location("not a url", "/relative"), None);
    }

    #[test]
    fn test_next_location_ends_chain() {
        let final_response = HttpResponse::new("http://a.com", 200, "");
        assert_eq!(next_location(&final_response).unwrap(), None);

        let missing_header = HttpResponse::new("http://a.com", 302, "");
        assert_eq!(next_location(&missing_header).unwrap(), None);
    }
}
