//! Host model.
//!
//! A `Host` is a validated, queryable network identity: a hostname, an IPv4
//! address or an IPv6 address. Each variant can render its relative
//! reverse-DNS domain, the name fragment prepended to a DNSBL query zone.
//!
//! Key types:
//! - `Host` - closed set of host kinds, compared by canonical form
//! - `Hostname` - lower-cased, validated label sequence
//! - `HostFactory` - ordered list of constructors, first success wins

mod factory;

pub use factory::{HostConstructor, HostFactory};

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error_handling::InvalidHostError;

/// Reverse zone root for IPv4 addresses.
pub const IPV4_REVERSE_ROOT: &str = "in-addr.arpa";
/// Reverse zone root for IPv6 addresses.
pub const IPV6_REVERSE_ROOT: &str = "ip6.arpa";

/// Maximum length of a DNS name in presentation form (without the trailing dot).
const MAX_HOSTNAME_LENGTH: usize = 253;

static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").expect("label pattern is valid")
});

/// A validated DNS hostname.
///
/// Stored lower-cased and without a trailing dot. The top-level label may not
/// be purely numeric, so dotted numbers that fail IPv4 parsing are not
/// mistaken for hostnames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hostname {
    name: String,
}

impl Hostname {
    pub fn parse(value: &str) -> Result<Self, InvalidHostError> {
        let trimmed = value.strip_suffix('.').unwrap_or(value);
        let name = trimmed.to_ascii_lowercase();

        if name.is_empty() {
            return Err(InvalidHostError::new(value, "empty hostname"));
        }
        if name.len() > MAX_HOSTNAME_LENGTH {
            return Err(InvalidHostError::new(value, "hostname too long"));
        }
        if let Some(label) = name.split('.').find(|l| !LABEL_PATTERN.is_match(l)) {
            return Err(InvalidHostError::new(
                value,
                format!("invalid hostname label '{label}'"),
            ));
        }
        let tld = name.rsplit('.').next().unwrap_or_default();
        if tld.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidHostError::new(value, "numeric top-level label"));
        }

        Ok(Self { name })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }

    /// True if stripping one or more leading labels from `self` yields `other`.
    pub fn is_subdomain_of(&self, other: &Hostname) -> bool {
        self.name.len() > other.name.len()
            && self.name.ends_with(other.name.as_str())
            && self.name.as_bytes()[self.name.len() - other.name.len() - 1] == b'.'
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A queryable network identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    Hostname(Hostname),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl Host {
    /// Builds a hostname host.
    pub fn hostname(value: &str) -> Result<Host, InvalidHostError> {
        Hostname::parse(value).map(Host::Hostname)
    }

    /// Builds an IPv4 host from dotted-quad notation.
    pub fn ipv4(value: &str) -> Result<Host, InvalidHostError> {
        value
            .parse::<Ipv4Addr>()
            .map(Host::Ipv4)
            .map_err(|e| InvalidHostError::new(value, format!("not an IPv4 address: {e}")))
    }

    /// Builds an IPv6 host. The bracketed literal form used in URLs is accepted.
    pub fn ipv6(value: &str) -> Result<Host, InvalidHostError> {
        let bare = value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(value);
        bare.parse::<Ipv6Addr>()
            .map(Host::Ipv6)
            .map_err(|e| InvalidHostError::new(value, format!("not an IPv6 address: {e}")))
    }

    /// Reverse-DNS name of this host relative to its zone root.
    ///
    /// Hostnames are their own relative domain; addresses use the standard
    /// reversed octet (`in-addr.arpa`) or nibble (`ip6.arpa`) form.
    pub fn relative_domain(&self) -> String {
        match self {
            Host::Hostname(name) => name.to_string(),
            Host::Ipv4(ip) => {
                let o = ip.octets();
                format!("{}.{}.{}.{}", o[3], o[2], o[1], o[0])
            }
            Host::Ipv6(ip) => ip
                .octets()
                .iter()
                .rev()
                .flat_map(|b| [b & 0x0f, b >> 4])
                .map(|nibble| format!("{nibble:x}"))
                .collect::<Vec<_>>()
                .join("."),
        }
    }

    /// Absolute reverse-DNS name (`None` for hostnames).
    pub fn reverse_pointer(&self) -> Option<String> {
        match self {
            Host::Hostname(_) => None,
            Host::Ipv4(_) => Some(format!("{}.{IPV4_REVERSE_ROOT}", self.relative_domain())),
            Host::Ipv6(_) => Some(format!("{}.{IPV6_REVERSE_ROOT}", self.relative_domain())),
        }
    }

    /// True only for a hostname that is a strict subdomain of another hostname.
    pub fn is_subdomain(&self, other: &Host) -> bool {
        match (self, other) {
            (Host::Hostname(a), Host::Hostname(b)) => a.is_subdomain_of(b),
            _ => false,
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Hostname(name) => name.fmt(f),
            Host::Ipv4(ip) => ip.fmt(f),
            Host::Ipv6(ip) => ip.fmt(f),
        }
    }
}
