//! Ready-made DNSBL configurations.
//!
//! Code tables follow the return codes published by each operator.

use std::net::Ipv4Addr;

use clap::ValueEnum;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

use super::Dnsbl;
use crate::classification::{SimpleClassificationCodeResolver, SumClassificationCodeResolver};
use crate::dns::DnsQuery;
use crate::host::{Host, HostConstructor, HostFactory};

/// Known DNS block lists selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, EnumIterMacro)]
pub enum DnsblPreset {
    /// Spamhaus ZEN (IPv4 addresses)
    SpamhausZen,
    /// Spamhaus Domain Block List (hostnames)
    SpamhausDbl,
    /// SURBL multi (hostnames and IPv4 addresses)
    SurblMulti,
}

impl DnsblPreset {
    pub fn identifier(self) -> &'static str {
        match self {
            DnsblPreset::SpamhausZen => "spamhaus_zen",
            DnsblPreset::SpamhausDbl => "spamhaus_dbl",
            DnsblPreset::SurblMulti => "surbl_multi",
        }
    }

    pub fn query_suffix(self) -> &'static str {
        match self {
            DnsblPreset::SpamhausZen => "zen.spamhaus.org",
            DnsblPreset::SpamhausDbl => "dbl.spamhaus.org",
            DnsblPreset::SurblMulti => "multi.surbl.org",
        }
    }

    /// Builds the preset's DNSBL on top of `dns`.
    pub fn build<Q: DnsQuery>(self, dns: Q) -> Dnsbl<Q> {
        match self {
            DnsblPreset::SpamhausZen => spamhaus_zen(dns),
            DnsblPreset::SpamhausDbl => spamhaus_dbl(dns),
            DnsblPreset::SurblMulti => surbl_multi(dns),
        }
    }
}

const SPAMHAUS_ZEN_CODES: &[(u32, &str)] = &[
    (2, "SBL: direct spam source"),
    (3, "SBL CSS: snowshoe spam source"),
    (4, "XBL: exploited or infected host"),
    (5, "XBL: exploited or infected host"),
    (6, "XBL: exploited or infected host"),
    (7, "XBL: exploited or infected host"),
    (9, "SBL DROP: hijacked or leased-to-spammer netblock"),
    (10, "PBL: ISP-declared end-user range"),
    (11, "PBL: end-user range listed by Spamhaus"),
];

const SPAMHAUS_DBL_CODES: &[(u32, &str)] = &[
    (2, "spam domain"),
    (4, "phishing domain"),
    (5, "malware domain"),
    (6, "botnet C&C domain"),
    (102, "abused legit spam domain"),
    (103, "abused legit spammed redirector domain"),
    (104, "abused legit phishing domain"),
    (105, "abused legit malware domain"),
    (106, "abused legit botnet C&C domain"),
];

const SURBL_MULTI_FLAGS: &[(u32, &str)] = &[
    (2, "deprecated: SpamCop web sites"),
    (4, "deprecated: sa-blacklist web sites"),
    (8, "phishing"),
    (16, "malware"),
    (32, "deprecated: AbuseButler web sites"),
    (64, "spam and other abuse"),
    (128, "cracked site"),
];

/// One line per preset: command-line name, source identifier and zone.
pub fn preset_summaries() -> Vec<String> {
    DnsblPreset::iter()
        .map(|preset| {
            let name = preset
                .to_possible_value()
                .map(|value| value.get_name().to_string())
                .unwrap_or_default();
            format!(
                "{name:<14} {:<14} {}",
                preset.identifier(),
                preset.query_suffix()
            )
        })
        .collect()
}

/// Spamhaus query errors: typing error, public resolver, excessive volume.
const SPAMHAUS_ERROR_ANSWERS: [Ipv4Addr; 4] = [
    Ipv4Addr::new(127, 255, 255, 252),
    Ipv4Addr::new(127, 255, 255, 253),
    Ipv4Addr::new(127, 255, 255, 254),
    Ipv4Addr::new(127, 255, 255, 255),
];

/// SURBL answers 127.0.0.1 to blocked resolvers.
const SURBL_ERROR_ANSWERS: [Ipv4Addr; 1] = [Ipv4Addr::new(127, 0, 0, 1)];

/// Spamhaus ZEN: IPv4 addresses only.
pub fn spamhaus_zen<Q: DnsQuery>(dns: Q) -> Dnsbl<Q> {
    let preset = DnsblPreset::SpamhausZen;
    Dnsbl::new(
        preset.identifier(),
        preset.query_suffix(),
        SimpleClassificationCodeResolver::new(SPAMHAUS_ZEN_CODES.iter().copied()),
        HostFactory::new(vec![Host::ipv4 as HostConstructor]),
        dns,
    )
    .with_error_answers(SPAMHAUS_ERROR_ANSWERS)
}

/// Spamhaus DBL: hostnames only.
pub fn spamhaus_dbl<Q: DnsQuery>(dns: Q) -> Dnsbl<Q> {
    let preset = DnsblPreset::SpamhausDbl;
    Dnsbl::new(
        preset.identifier(),
        preset.query_suffix(),
        SimpleClassificationCodeResolver::new(SPAMHAUS_DBL_CODES.iter().copied()),
        HostFactory::hostname_only(),
        dns,
    )
    .with_error_answers(SPAMHAUS_ERROR_ANSWERS)
}

/// SURBL multi: hostnames and IPv4 addresses, answers are sums of flags.
pub fn surbl_multi<Q: DnsQuery>(dns: Q) -> Dnsbl<Q> {
    let preset = DnsblPreset::SurblMulti;
    Dnsbl::new(
        preset.identifier(),
        preset.query_suffix(),
        SumClassificationCodeResolver::new(SURBL_MULTI_FLAGS.iter().copied()),
        HostFactory::hostname_or_ipv4(),
        dns,
    )
    .with_error_answers(SURBL_ERROR_ANSWERS)
}
