//! Denylist sources.
//!
//! This module provides the concrete sources a check can query:
//! - `Dnsbl` - DNS-based block lists, with presets for well-known zones
//! - `HpHosts` - the hpHosts HTTP verification service
//! - `GoogleSafeBrowsing` - the Safe Browsing lookup API (URL batches)
//! - `HostCollection` - a local host list, e.g. loaded from a hosts file

mod dnsbl;
mod host_collection;
mod hp_hosts;
pub mod presets;
mod safe_browsing;

// Re-export public API
pub use dnsbl::Dnsbl;
pub use host_collection::HostCollection;
pub use hp_hosts::HpHosts;
pub use presets::DnsblPreset;
pub use safe_browsing::GoogleSafeBrowsing;
