//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::Resolver;
use log::{debug, warn};

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};
use crate::dns::HickoryDnsQuery;
use crate::error_handling::InitializationError;

/// Resolver options used for DNSBL queries.
pub(crate) fn resolver_opts() -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    // DNSBL query names are absolute; never append search domains
    opts.ndots = 0;
    opts
}

/// Upstream servers from the system configuration, or Google public DNS
/// when it cannot be read.
///
/// Spamhaus refuses queries relayed by public resolvers, so the system
/// configuration comes first.
fn upstream_config() -> ResolverConfig {
    match read_system_conf() {
        Ok((config, _)) => {
            debug!("Using system DNS configuration");
            config
        }
        Err(e) => {
            warn!("Failed to read system DNS configuration, using public resolvers: {e}");
            ResolverConfig::default()
        }
    }
}

/// Initializes the DNS resolver shared by all DNSBL sources.
///
/// Uses the system's upstream servers with short timeouts so an
/// unresponsive server cannot stall a check.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the resolver cannot be
/// created.
pub fn init_resolver() -> Result<HickoryDnsQuery, InitializationError> {
    let resolver = Resolver::new(upstream_config(), resolver_opts())
        .map_err(|e| InitializationError::DnsResolverError(e.to_string()))?;
    Ok(HickoryDnsQuery::new(resolver))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_opts_use_configured_timeouts() {
        let opts = resolver_opts();
        assert_eq!(opts.timeout, Duration::from_secs(DNS_TIMEOUT_SECS));
        assert_eq!(opts.attempts, DNS_ATTEMPTS);
        assert_eq!(opts.ndots, 0);
    }

    #[test]
    fn test_upstream_config_has_name_servers() {
        assert!(!upstream_config().name_servers().is_empty());
    }
}
