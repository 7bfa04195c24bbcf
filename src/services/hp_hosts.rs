//! hpHosts verification service.

use url::Url;

use crate::classification::Classification;
use crate::config::HP_HOSTS_URL;
use crate::error_handling::{check_service_status, DenylistError, TransportError};
use crate::fetch::HttpClient;
use crate::host::{Host, HostFactory};
use crate::host_list::HostList;

const HP_HOSTS_IDENTIFIER: &str = "hphosts";

/// hpHosts lookups over HTTP.
///
/// The service answers `Not Listed`, or `Listed` optionally followed by a
/// comma-separated list of classes when those are requested. It only knows
/// hostnames and IPv4 addresses.
pub struct HpHosts<C> {
    client_name: String,
    base_url: String,
    host_factory: HostFactory,
    http: C,
}

impl<C: HttpClient> HpHosts<C> {
    pub fn new(client_name: impl Into<String>, http: C) -> Self {
        Self {
            client_name: client_name.into(),
            base_url: HP_HOSTS_URL.to_string(),
            host_factory: HostFactory::hostname_or_ipv4(),
            http,
        }
    }

    /// Points the source at another verification endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self, host: &Host, with_classes: bool) -> Result<Url, DenylistError> {
        let host = host.to_string();
        let mut params = vec![("v", self.client_name.as_str()), ("s", host.as_str())];
        if with_classes {
            params.push(("class", "true"));
        }
        Url::parse_with_params(&self.base_url, &params)
            .map_err(|_| TransportError::InvalidUrl(self.base_url.clone()).into())
    }

    fn query(&self, host: &Host, with_classes: bool) -> Result<String, DenylistError> {
        let url = self.request_url(host, with_classes)?;
        let response = self.http.get(url.as_str())?;
        check_service_status(HP_HOSTS_IDENTIFIER, &response)?;
        Ok(response.body)
    }

    /// Parses a verification answer into `None` (not listed) or the listed classes.
    fn parse_answer(&self, body: &str) -> Result<Option<Classification>, DenylistError> {
        let mut fields = body.trim().split(',').map(str::trim);
        match fields.next() {
            Some("Listed") => Ok(Some(fields.filter(|class| !class.is_empty()).collect())),
            Some("Not Listed") => Ok(None),
            _ => Err(DenylistError::MalformedResponse {
                source_id: HP_HOSTS_IDENTIFIER.to_string(),
                detail: format!("unexpected answer {body:?}"),
            }),
        }
    }
}

impl<C: HttpClient> HostList for HpHosts<C> {
    fn identifier(&self) -> &str {
        HP_HOSTS_IDENTIFIER
    }

    fn host_factory(&self) -> &HostFactory {
        &self.host_factory
    }

    fn contains_host(&self, host: &Host) -> Result<bool, DenylistError> {
        let body = self.query(host, false)?;
        Ok(self.parse_answer(&body)?.is_some())
    }

    fn match_and_classification(
        &self,
        host: &Host,
    ) -> Result<Option<(String, Classification)>, DenylistError> {
        let body = self.query(host, true)?;
        Ok(self
            .parse_answer(&body)?
            .map(|classification| (host.to_string(), classification)))
    }
}

impl<C> std::fmt::Debug for HpHosts<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HpHosts")
            .field("client_name", &self.client_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
