//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_HOSTS_CLASS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::services::DnsblPreset;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// How matches are printed by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `url: source [labels]` line per match
    Plain,
    /// One JSON object per match
    Json,
}

/// Check configuration.
///
/// Parsed from the command line by the binary; library users can build it
/// directly, starting from `Config::default()`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "denylist",
    version,
    about = "Check URLs against DNS block lists, reputation services and local host lists"
)]
pub struct Config {
    /// URLs to check
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// File to read additional URLs from (one per line, `#` starts a comment)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// DNS block list to query; may be repeated
    #[arg(long = "dnsbl", value_enum)]
    pub dnsbl: Vec<DnsblPreset>,

    /// Print the available DNS block lists and exit
    #[arg(long)]
    pub list_dnsbl: bool,

    /// Hosts file used as a local denylist
    #[arg(long)]
    pub hosts_file: Option<PathBuf>,

    /// Classification label for entries of the hosts file
    #[arg(long, default_value = DEFAULT_HOSTS_CLASS)]
    pub hosts_class: String,

    /// Client identifier for hpHosts lookups; enables the hpHosts source
    #[arg(long, env = "HPHOSTS_CLIENT")]
    pub hphosts_client: Option<String>,

    /// Google Safe Browsing API key; enables the Safe Browsing source
    #[arg(long, env = "GSB_API_KEY", hide_env_values = true)]
    pub gsb_api_key: Option<String>,

    /// Client name reported to Google Safe Browsing
    #[arg(long, default_value = "denylist")]
    pub gsb_client: String,

    /// Also check every location reached by following the URLs' redirects
    #[arg(long)]
    pub follow_redirects: bool,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Output format for matches
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            dnsbl: Vec::new(),
            list_dnsbl: false,
            hosts_file: None,
            hosts_class: DEFAULT_HOSTS_CLASS.to_string(),
            hphosts_client: None,
            gsb_api_key: None,
            gsb_client: "denylist".to_string(),
            follow_redirects: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            output: OutputFormat::Plain,
        }
    }
}

impl Config {
    /// Returns `true` if at least one denylist source is configured.
    pub fn has_sources(&self) -> bool {
        !self.dnsbl.is_empty()
            || self.hosts_file.is_some()
            || self.hphosts_client.is_some()
            || self.gsb_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.urls.is_empty());
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.follow_redirects);
        assert!(!config.has_sources());
    }

    #[test]
    fn test_parse_cli_arguments() {
        let config = Config::try_parse_from([
            "denylist",
            "http://a.com",
            "https://b.com/x",
            "--dnsbl",
            "spamhaus-zen",
            "--dnsbl",
            "surbl-multi",
            "--follow-redirects",
            "--output",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.urls, vec!["http://a.com", "https://b.com/x"]);
        assert_eq!(
            config.dnsbl,
            vec![DnsblPreset::SpamhausZen, DnsblPreset::SurblMulti]
        );
        assert!(config.follow_redirects);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.has_sources());
    }

    #[test]
    fn test_parse_list_dnsbl_flag() {
        let config = Config::try_parse_from(["denylist", "--list-dnsbl"]).unwrap();
        assert!(config.list_dnsbl);
        assert!(config.urls.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_preset() {
        assert!(Config::try_parse_from(["denylist", "--dnsbl", "nope"]).is_err());
    }
}
