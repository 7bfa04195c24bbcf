//! DNS-based block lists.

use std::net::Ipv4Addr;

use log::{debug, warn};

use crate::classification::{Classification, ClassificationResolver};
use crate::dns::{response_code, DnsQuery, DnsQueryError};
use crate::error_handling::DenylistError;
use crate::host::{Host, HostFactory};
use crate::host_list::HostList;

/// A DNSBL zone queried through `DnsQuery`.
///
/// A host is listed when `<relative domain>.<query suffix>.` has A records.
/// Each answer's last octet is a response code decoded by the zone's
/// classification resolver.
///
/// Operators signal refused or malformed queries with reserved answers (for
/// example Spamhaus' `127.255.255.254` for queries sent through a public
/// resolver). Those answers are errors, never listings.
pub struct Dnsbl<Q> {
    identifier: String,
    query_suffix: String,
    classification_resolver: Box<dyn ClassificationResolver>,
    host_factory: HostFactory,
    error_answers: Vec<Ipv4Addr>,
    dns: Q,
}

impl<Q: DnsQuery> Dnsbl<Q> {
    pub fn new(
        identifier: impl Into<String>,
        query_suffix: &str,
        classification_resolver: impl ClassificationResolver + 'static,
        host_factory: HostFactory,
        dns: Q,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            query_suffix: query_suffix.trim_end_matches('.').to_ascii_lowercase(),
            classification_resolver: Box::new(classification_resolver),
            host_factory,
            error_answers: Vec::new(),
            dns,
        }
    }

    /// Answers the operator uses to report a query error.
    pub fn with_error_answers(mut self, answers: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        self.error_answers = answers.into_iter().collect();
        self
    }

    pub fn query_suffix(&self) -> &str {
        &self.query_suffix
    }

    /// Absolute name queried for `host`.
    pub fn query_name(&self, host: &Host) -> String {
        format!("{}.{}.", host.relative_domain(), self.query_suffix)
    }

    /// Raw answers for `host`; empty when the zone does not list it.
    fn query(&self, host: &Host) -> Result<Vec<String>, DenylistError> {
        let name = self.query_name(host);
        match self.dns.query(&name) {
            Ok(answers) => {
                if let Some(refusal) = answers.iter().find(|a| self.is_error_answer(a)) {
                    return Err(DenylistError::Dns {
                        name,
                        detail: format!("{} refused the query with {refusal}", self.identifier),
                    });
                }
                Ok(answers)
            }
            Err(DnsQueryError::NxDomain) => {
                debug!("{}: {name} not listed", self.identifier);
                Ok(Vec::new())
            }
            Err(DnsQueryError::Timeout) => {
                warn!("{}: query for {name} timed out, treating as not listed", self.identifier);
                Ok(Vec::new())
            }
            Err(DnsQueryError::Other(detail)) => Err(DenylistError::Dns { name, detail }),
        }
    }

    fn is_error_answer(&self, answer: &str) -> bool {
        answer
            .trim()
            .parse::<Ipv4Addr>()
            .is_ok_and(|address| self.error_answers.contains(&address))
    }

    fn classify(&self, answers: &[String]) -> Result<Classification, DenylistError> {
        let mut classification = Classification::new();
        for answer in answers {
            let code = response_code(answer).ok_or_else(|| DenylistError::MalformedResponse {
                source_id: self.identifier.clone(),
                detail: format!("expected an IPv4 answer, got {answer:?}"),
            })?;
            classification.extend(self.classification_resolver.resolve(code)?);
        }
        Ok(classification)
    }
}

impl<Q: DnsQuery> HostList for Dnsbl<Q> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn host_factory(&self) -> &HostFactory {
        &self.host_factory
    }

    /// Presence of any answer; codes are not decoded.
    fn contains_host(&self, host: &Host) -> Result<bool, DenylistError> {
        Ok(!self.query(host)?.is_empty())
    }

    fn match_and_classification(
        &self,
        host: &Host,
    ) -> Result<Option<(String, Classification)>, DenylistError> {
        let answers = self.query(host)?;
        if answers.is_empty() {
            return Ok(None);
        }
        Ok(Some((host.to_string(), self.classify(&answers)?)))
    }
}

impl<Q> std::fmt::Debug for Dnsbl<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dnsbl")
            .field("identifier", &self.identifier)
            .field("query_suffix", &self.query_suffix)
            .field("host_factory", &self.host_factory)
            .field("error_answers", &self.error_answers)
            .finish_non_exhaustive()
    }
}
