//! denylist library: host and URL reputation checks
//!
//! This library checks hosts and URLs against denylist sources and reports
//! which source listed them and why:
//! - DNS-based block lists (Spamhaus ZEN/DBL, SURBL multi, or any custom zone)
//! - the hpHosts verification service
//! - Google Safe Browsing (URL batches)
//! - local host lists such as a hosts file
//!
//! Sources are composed with `UrlTesterChain`, and `UrlsAndLocations` widens
//! a URL batch with every location its URLs redirect to.
//!
//! # Example
//!
//! ```no_run
//! use denylist::{Config, DnsblPreset, run_check};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     urls: vec!["http://example.com".to_string()],
//!     dnsbl: vec![DnsblPreset::SpamhausDbl, DnsblPreset::SurblMulti],
//!     follow_redirects: true,
//!     ..Default::default()
//! };
//!
//! let report = run_check(&config)?;
//! for item in &report.matches {
//!     println!("{} listed by {}: {}", item.value, item.source, item.classification);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All network I/O is blocking; every collaborator sits behind a trait
//! (`DnsQuery`, `HttpClient`, `RedirectSession`) so it can be replaced.

pub mod classification;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod fetch;
pub mod host;
pub mod host_list;
pub mod initialization;
mod models;
pub mod redirect;
mod run;
pub mod services;
pub mod tester;
pub mod validation;

// Re-export public API
pub use classification::{
    Classification, ClassificationResolver, SimpleClassificationCodeResolver,
    SumClassificationCodeResolver,
};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{DenylistError, InvalidHostError, TransportError, UnknownCodeError};
pub use host::{Host, HostFactory};
pub use host_list::HostList;
pub use models::AddressListItem;
pub use redirect::{RedirectUrlResolver, ResolveRedirects, UrlsAndLocations};
pub use run::{
    build_chain, check_urls, collect_urls, read_urls, run_check, CheckReport, HOSTS_FILE_SOURCE_ID,
};
pub use services::{Dnsbl, DnsblPreset, GoogleSafeBrowsing, HostCollection, HpHosts};
pub use tester::{UrlTester, UrlTesterChain};
