//! Locally held host lists.

use std::io::BufRead;
use std::net::IpAddr;

use log::debug;

use crate::classification::Classification;
use crate::error_handling::{DenylistError, InitializationError, InvalidHostError};
use crate::host::{Host, HostFactory};
use crate::host_list::HostList;

/// An in-memory set of hosts sharing one classification.
///
/// A queried host matches a stored entry if it is equal to it or one of its
/// subdomains; the reported value is the stored entry.
#[derive(Debug, Clone)]
pub struct HostCollection {
    identifier: String,
    classification: Classification,
    host_factory: HostFactory,
    hosts: Vec<Host>,
}

impl HostCollection {
    pub fn new(identifier: impl Into<String>, classification: Classification) -> Self {
        Self {
            identifier: identifier.into(),
            classification,
            host_factory: HostFactory::default(),
            hosts: Vec::new(),
        }
    }

    pub fn with_host_factory(mut self, host_factory: HostFactory) -> Self {
        self.host_factory = host_factory;
        self
    }

    /// Adds `value` unless an equal host is already stored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHostError` if the host factory rejects `value`.
    pub fn add(&mut self, value: &str) -> Result<(), InvalidHostError> {
        let host = self.host_factory.create_host(value)?;
        if !self.hosts.contains(&host) {
            self.hosts.push(host);
        }
        Ok(())
    }

    /// Builds a collection from a hosts file.
    ///
    /// Blank lines and `#` comments are skipped. A line holds either a single
    /// host, or an address followed by one or more host names as in
    /// `/etc/hosts`; in the latter case the names are stored.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HostsFileError` for an unreadable line or
    /// an invalid host, naming the line.
    pub fn from_reader<R: BufRead>(
        identifier: impl Into<String>,
        classification: Classification,
        reader: R,
    ) -> Result<Self, InitializationError> {
        let mut collection = Self::new(identifier, classification);

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                InitializationError::HostsFileError(format!("line {}: {e}", index + 1))
            })?;
            let content = line.split('#').next().unwrap_or_default();
            let fields: Vec<&str> = content.split_whitespace().collect();

            let names = match fields.as_slice() {
                [] => continue,
                [address, names @ ..] if !names.is_empty() && address.parse::<IpAddr>().is_ok() => {
                    names
                }
                _ => &fields[..],
            };

            for name in names {
                collection.add(name).map_err(|e| {
                    InitializationError::HostsFileError(format!("line {}: {e}", index + 1))
                })?;
            }
        }

        debug!(
            "Loaded {} hosts into {}",
            collection.hosts.len(),
            collection.identifier
        );
        Ok(collection)
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn find(&self, host: &Host) -> Option<&Host> {
        self.hosts
            .iter()
            .find(|stored| *stored == host || host.is_subdomain(stored))
    }
}

impl HostList for HostCollection {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn host_factory(&self) -> &HostFactory {
        &self.host_factory
    }

    fn contains_host(&self, host: &Host) -> Result<bool, DenylistError> {
        Ok(self.find(host).is_some())
    }

    fn match_and_classification(
        &self,
        host: &Host,
    ) -> Result<Option<(String, Classification)>, DenylistError> {
        Ok(self
            .find(host)
            .map(|stored| (stored.to_string(), self.classification.clone())))
    }
}
