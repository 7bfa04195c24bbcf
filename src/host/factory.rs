//! Host factory.
//!
//! Tries an ordered list of host constructors and returns the first host
//! built without a validation failure.

use super::Host;
use crate::error_handling::InvalidHostError;

/// A function building one kind of host from raw input.
pub type HostConstructor = fn(&str) -> Result<Host, InvalidHostError>;

/// Ordered list of host constructors.
#[derive(Clone)]
pub struct HostFactory {
    constructors: Vec<HostConstructor>,
}

impl HostFactory {
    pub fn new(constructors: Vec<HostConstructor>) -> Self {
        Self { constructors }
    }

    /// IPv4, then IPv6, then hostname.
    pub fn hostname_or_ip() -> Self {
        Self::new(vec![Host::ipv4 as HostConstructor, Host::ipv6, Host::hostname])
    }

    /// IPv4, then hostname. IPv6 input is rejected.
    pub fn hostname_or_ipv4() -> Self {
        Self::new(vec![Host::ipv4 as HostConstructor, Host::hostname])
    }

    /// IPv4, then IPv6.
    pub fn ip_only() -> Self {
        Self::new(vec![Host::ipv4 as HostConstructor, Host::ipv6])
    }

    pub fn hostname_only() -> Self {
        Self::new(vec![Host::hostname as HostConstructor])
    }

    /// Builds a host with the first constructor that accepts `value`.
    ///
    /// # Errors
    ///
    /// Returns the last constructor's `InvalidHostError` if none accepts the input.
    pub fn create_host(&self, value: &str) -> Result<Host, InvalidHostError> {
        let mut last_error = InvalidHostError::new(value, "no host constructor configured");
        for construct in &self.constructors {
            match construct(value) {
                Ok(host) => return Ok(host),
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }
}

impl Default for HostFactory {
    fn default() -> Self {
        Self::hostname_or_ip()
    }
}

impl std::fmt::Debug for HostFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostFactory")
            .field("constructors", &self.constructors.len())
            .finish()
    }
}
