//! DNS collaborator used by DNSBL lookups.
//!
//! `DnsQuery` answers "which A records exist for this absolute name?".
//! A missing name and a timed-out query are reported separately from other
//! failures because DNSBL sources treat both as "not listed".

mod query;

pub use query::HickoryDnsQuery;

use std::net::Ipv4Addr;
use std::sync::Arc;

use thiserror::Error;

/// Failure modes of a DNS query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnsQueryError {
    /// The name does not exist or has no A records.
    #[error("no such name")]
    NxDomain,

    #[error("DNS query timed out")]
    Timeout,

    #[error("DNS query failed: {0}")]
    Other(String),
}

/// Resolves A records for a fully qualified name.
pub trait DnsQuery {
    /// Returns the textual answers, e.g. `["127.0.0.2"]`.
    fn query(&self, name: &str) -> Result<Vec<String>, DnsQueryError>;
}

impl<Q: DnsQuery + ?Sized> DnsQuery for &Q {
    fn query(&self, name: &str) -> Result<Vec<String>, DnsQueryError> {
        (**self).query(name)
    }
}

impl<Q: DnsQuery + ?Sized> DnsQuery for Arc<Q> {
    fn query(&self, name: &str) -> Result<Vec<String>, DnsQueryError> {
        (**self).query(name)
    }
}

/// Response code carried by a DNSBL answer: the last octet of its IPv4 address.
///
/// Returns `None` if `answer` is not an IPv4 address.
pub fn response_code(answer: &str) -> Option<u32> {
    let address: Ipv4Addr = answer.trim().parse().ok()?;
    Some(u32::from(address.octets()[3]))
}
