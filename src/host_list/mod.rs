//! Host lists.
//!
//! A host list answers membership and classification queries for single
//! hosts. Implementors supply two extension points:
//! - `contains_host` - is this already-validated host listed?
//! - `match_and_classification` - which entry matched, and how is it classified?
//!
//! The provided `contains`/`lookup` methods turn raw input into a `Host` with
//! the list's own factory. Input the factory rejects is simply not listed.
//!
//! Every host list is also a `UrlTester`: the host component of each URL is
//! queried.

use log::debug;

use crate::classification::Classification;
use crate::error_handling::DenylistError;
use crate::host::{Host, HostFactory};
use crate::models::AddressListItem;
use crate::tester::{Matches, UrlTester};
use crate::validation::{accepts_valid_urls, url_host};

/// Membership and classification queries for individual hosts.
pub trait HostList {
    /// Identifier recorded as the `source` of every produced match.
    fn identifier(&self) -> &str;

    /// Factory deciding which host kinds the list supports.
    fn host_factory(&self) -> &HostFactory;

    fn contains_host(&self, host: &Host) -> Result<bool, DenylistError>;

    /// Matched entry and its classification, or `None` if `host` is not listed.
    fn match_and_classification(
        &self,
        host: &Host,
    ) -> Result<Option<(String, Classification)>, DenylistError>;

    /// Returns `true` if `value` names a listed host.
    ///
    /// Values the host factory rejects are reported as not listed.
    fn contains(&self, value: &str) -> Result<bool, DenylistError> {
        match self.host_factory().create_host(value) {
            Ok(host) => self.contains_host(&host),
            Err(e) => {
                debug!("{}: treating {value:?} as not listed: {e}", self.identifier());
                Ok(false)
            }
        }
    }

    /// Returns the listed item matching `value`, if any.
    ///
    /// Values the host factory rejects yield `None`.
    fn lookup(&self, value: &str) -> Result<Option<AddressListItem>, DenylistError> {
        let host = match self.host_factory().create_host(value) {
            Ok(host) => host,
            Err(e) => {
                debug!("{}: treating {value:?} as not listed: {e}", self.identifier());
                return Ok(None);
            }
        };

        Ok(self
            .match_and_classification(&host)?
            .map(|(matched, classification)| {
                AddressListItem::new(matched, self.identifier(), classification)
            }))
    }
}

/// Host component of an already validated URL, as a plain string.
fn host_value(url: &str) -> Option<String> {
    url_host(url).map(|host| host.to_string())
}

impl<L: HostList> UrlTester for L {
    fn source_id(&self) -> &str {
        self.identifier()
    }

    fn any_match(&self, urls: &[String]) -> Result<bool, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            for host in urls.iter().filter_map(|url| host_value(url)) {
                if self.contains(&host)? {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    fn lookup_matching<'a>(&'a self, urls: &'a [String]) -> Result<Matches<'a>, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            let matches = urls
                .iter()
                .filter_map(|url| host_value(url))
                .filter_map(move |host| self.lookup(&host).transpose());
            Ok(Box::new(matches) as Matches<'a>)
        })
    }

    fn filter_matching(&self, urls: &[String]) -> Result<Vec<String>, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            let mut matching: Vec<String> = Vec::new();
            for url in urls {
                if matching.contains(url) {
                    continue;
                }
                let Some(host) = host_value(url) else {
                    continue;
                };
                if self.contains(&host)? {
                    matching.push(url.clone());
                }
            }
            Ok(matching)
        })
    }
}
