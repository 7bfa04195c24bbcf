//! URL validation.
//!
//! Every URL-accepting tester operation runs its input through
//! `accepts_valid_urls` before doing any work. A URL is valid when:
//! - it parses, and its scheme is http, https or ftp
//! - its host is a valid IPv4 address, IPv6 literal, or a hostname with a top-level label
//! - its port, path and query are well formed (enforced by the parser)
//! - it holds no whitespace or control characters, which the parser would
//!   otherwise strip silently

use url::Url;

use crate::error_handling::DenylistError;
use crate::host::{Host, Hostname};

const ACCEPTED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Returns `true` if `url` is a syntactically valid URL with a supported host.
pub fn is_valid_url(url: &str) -> bool {
    url_host(url).is_some()
}

/// Extracts the host of a valid URL.
///
/// Returns `None` for anything `is_valid_url` would reject.
pub fn url_host(url: &str) -> Option<Host> {
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let parsed = Url::parse(url).ok()?;
    if !ACCEPTED_SCHEMES.contains(&parsed.scheme()) {
        return None;
    }

    match parsed.host()? {
        url::Host::Ipv4(ip) => Some(Host::Ipv4(ip)),
        url::Host::Ipv6(ip) => Some(Host::Ipv6(ip)),
        url::Host::Domain(domain) => {
            let hostname = Hostname::parse(domain).ok()?;
            // A bare label such as "testdomaincom" is not a routable URL host
            if hostname.labels().count() < 2 {
                return None;
            }
            Some(Host::Hostname(hostname))
        }
    }
}

/// Validates a batch of URLs and only then runs `operation` on it.
///
/// # Errors
///
/// Returns `DenylistError::InvalidUrl` for the first invalid URL; `operation`
/// is not invoked in that case.
pub fn accepts_valid_urls<'a, T, F>(urls: &'a [String], operation: F) -> Result<T, DenylistError>
where
    F: FnOnce(&'a [String]) -> Result<T, DenylistError>,
{
    ensure_valid_urls(urls)?;
    operation(urls)
}

/// Fails with `InvalidUrl` for the first invalid URL in `urls`.
pub fn ensure_valid_urls(urls: &[String]) -> Result<(), DenylistError> {
    match urls.iter().find(|u| !is_valid_url(u)) {
        Some(invalid) => Err(DenylistError::invalid_url(invalid.as_str())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests;
