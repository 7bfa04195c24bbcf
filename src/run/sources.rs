//! Denylist source setup.
//!
//! This module turns a `Config` into the `UrlTesterChain` a check runs
//! against, in a fixed order: DNSBL presets, the local hosts file, hpHosts,
//! then Google Safe Browsing.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use log::info;

use crate::classification::Classification;
use crate::config::Config;
use crate::dns::DnsQuery;
use crate::fetch::HttpClient;
use crate::services::{GoogleSafeBrowsing, HostCollection, HpHosts};
use crate::tester::UrlTesterChain;

/// Identifier of the source built from `--hosts-file`.
pub const HOSTS_FILE_SOURCE_ID: &str = "hosts_file";

/// Builds the tester chain for every source enabled in `config`.
///
/// All DNSBL sources share `dns`; the HTTP-backed sources share `http`.
///
/// # Errors
///
/// Returns an error if the hosts file cannot be opened or contains an
/// invalid host.
pub fn build_chain<Q, C>(config: &Config, dns: Q, http: C) -> Result<UrlTesterChain>
where
    Q: DnsQuery + Clone + 'static,
    C: HttpClient + Clone + 'static,
{
    let mut chain = UrlTesterChain::default();

    let mut seen = HashSet::new();
    for preset in config.dnsbl.iter().copied().filter(|p| seen.insert(*p)) {
        info!("Using DNSBL {} ({})", preset.identifier(), preset.query_suffix());
        chain.push(Box::new(preset.build(dns.clone())));
    }

    if let Some(path) = &config.hosts_file {
        let file = File::open(path)
            .with_context(|| format!("Failed to open hosts file {}", path.display()))?;
        let classification: Classification = [config.hosts_class.as_str()].into_iter().collect();
        let hosts = HostCollection::from_reader(
            HOSTS_FILE_SOURCE_ID,
            classification,
            BufReader::new(file),
        )
        .with_context(|| format!("Failed to load hosts file {}", path.display()))?;
        info!("Loaded {} hosts from {}", hosts.len(), path.display());
        chain.push(Box::new(hosts));
    }

    if let Some(client_name) = &config.hphosts_client {
        info!("Using hpHosts as client {client_name}");
        chain.push(Box::new(HpHosts::new(client_name.clone(), http.clone())));
    }

    if let Some(api_key) = &config.gsb_api_key {
        info!("Using Google Safe Browsing as client {}", config.gsb_client);
        chain.push(Box::new(GoogleSafeBrowsing::new(
            config.gsb_client.clone(),
            env!("CARGO_PKG_VERSION"),
            api_key.clone(),
            http,
        )));
    }

    Ok(chain)
}
