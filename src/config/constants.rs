//! Configuration constants.
//!
//! Timeouts, limits and service endpoints used throughout the crate.

// Network operation timeouts
/// DNS query timeout in seconds
/// Most DNSBL answers arrive well under a second; a timed-out query is treated as "not listed"
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS attempts per query before giving up
pub const DNS_ATTEMPTS: usize = 2;
/// Default per-request HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Redirect resolution uses a browser-like value since some shorteners and
/// cloaking pages answer differently to unknown clients.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

// Google Safe Browsing lookup API
pub const GSB_LOOKUP_URL: &str = "https://sb-ssl.google.com/safebrowsing/api/lookup";
pub const GSB_PROTOCOL_VERSION: &str = "3.1";
/// Maximum number of URLs accepted by a single lookup request
pub const GSB_MAX_URLS_PER_REQUEST: usize = 500;

// hpHosts verification endpoint
pub const HP_HOSTS_URL: &str = "http://verify.hosts-file.net/";

/// Classification label given to entries loaded from a hosts file when none is configured
pub const DEFAULT_HOSTS_CLASS: &str = "local denylist";
