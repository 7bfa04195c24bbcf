//! `DnsQuery` backed by hickory-resolver.

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::Resolver;
use log::debug;

use super::{DnsQuery, DnsQueryError};

/// Synchronous A-record lookups through a shared hickory `Resolver`.
pub struct HickoryDnsQuery {
    resolver: Resolver,
}

impl HickoryDnsQuery {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

impl std::fmt::Debug for HickoryDnsQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryDnsQuery").finish_non_exhaustive()
    }
}

impl DnsQuery for HickoryDnsQuery {
    fn query(&self, name: &str) -> Result<Vec<String>, DnsQueryError> {
        let lookup = self
            .resolver
            .lookup(name, RecordType::A)
            .map_err(|e| map_resolve_error(name, e))?;

        Ok(lookup
            .iter()
            .map(|rdata| match rdata {
                RData::A(address) => address.to_string(),
                other => other.to_string(),
            })
            .collect())
    }
}

fn map_resolve_error(name: &str, error: ResolveError) -> DnsQueryError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => {
            debug!("No A records for {name}");
            DnsQueryError::NxDomain
        }
        ResolveErrorKind::Timeout => DnsQueryError::Timeout,
        _ => DnsQueryError::Other(error.to_string()),
    }
}
