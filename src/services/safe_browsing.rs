//! Google Safe Browsing lookup API.

use std::collections::HashSet;

use url::Url;

use crate::classification::Classification;
use crate::config::{GSB_LOOKUP_URL, GSB_MAX_URLS_PER_REQUEST, GSB_PROTOCOL_VERSION};
use crate::error_handling::{check_service_status, DenylistError, TransportError};
use crate::fetch::HttpClient;
use crate::models::AddressListItem;
use crate::tester::{Matches, UrlTester};
use crate::validation::accepts_valid_urls;

const GSB_IDENTIFIER: &str = "google_safe_browsing";

/// Answer line for a URL that is not listed.
const NOT_LISTED: &str = "ok";

/// URL tester backed by the Safe Browsing lookup API.
///
/// URLs are posted in batches of at most `GSB_MAX_URLS_PER_REQUEST`. The
/// service answers 204 when no URL of the batch is listed, or 200 with one
/// line per URL: `ok`, or a comma-separated list of threat labels.
pub struct GoogleSafeBrowsing<C> {
    client_name: String,
    app_version: String,
    api_key: String,
    endpoint: String,
    http: C,
}

impl<C: HttpClient> GoogleSafeBrowsing<C> {
    pub fn new(
        client_name: impl Into<String>,
        app_version: impl Into<String>,
        api_key: impl Into<String>,
        http: C,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            app_version: app_version.into(),
            api_key: api_key.into(),
            endpoint: GSB_LOOKUP_URL.to_string(),
            http,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_url(&self) -> Result<Url, DenylistError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", self.client_name.as_str()),
                ("key", self.api_key.as_str()),
                ("appver", self.app_version.as_str()),
                ("pver", GSB_PROTOCOL_VERSION),
            ],
        )
        .map_err(|_| TransportError::InvalidUrl(self.endpoint.clone()).into())
    }

    /// Listed URLs of one batch, with their classification.
    fn query_batch<'a>(
        &self,
        batch: &'a [String],
    ) -> Result<Vec<(&'a String, Classification)>, DenylistError> {
        let body = format!("{}\n{}", batch.len(), batch.join("\n"));
        let response = self.http.post(self.request_url()?.as_str(), body)?;
        check_service_status(GSB_IDENTIFIER, &response)?;

        if response.status == 204 {
            return Ok(Vec::new());
        }

        let lines: Vec<&str> = response.body.lines().collect();
        if lines.len() != batch.len() {
            return Err(DenylistError::MalformedResponse {
                source_id: GSB_IDENTIFIER.to_string(),
                detail: format!("{} answer lines for {} URLs", lines.len(), batch.len()),
            });
        }

        Ok(batch
            .iter()
            .zip(lines)
            .filter(|(_, line)| line.trim() != NOT_LISTED)
            .map(|(url, line)| (url, line.split(',').map(str::trim).collect()))
            .collect())
    }

    /// Lazily queries each batch of `urls`; a failing batch ends the sequence.
    fn matches<'a>(
        &'a self,
        urls: &'a [String],
    ) -> impl Iterator<Item = Result<(&'a String, Classification), DenylistError>> + 'a {
        let mut found = urls
            .chunks(GSB_MAX_URLS_PER_REQUEST)
            .flat_map(move |batch| match self.query_batch(batch) {
                Ok(listed) => listed.into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            });

        let mut failed = false;
        std::iter::from_fn(move || {
            if failed {
                return None;
            }
            let item = found.next()?;
            failed = item.is_err();
            Some(item)
        })
    }
}

impl<C: HttpClient> UrlTester for GoogleSafeBrowsing<C> {
    fn source_id(&self) -> &str {
        GSB_IDENTIFIER
    }

    fn any_match(&self, urls: &[String]) -> Result<bool, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            for batch in urls.chunks(GSB_MAX_URLS_PER_REQUEST) {
                if !self.query_batch(batch)?.is_empty() {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    fn lookup_matching<'a>(&'a self, urls: &'a [String]) -> Result<Matches<'a>, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            let items = self.matches(urls).map(|found| {
                found.map(|(url, classification)| {
                    AddressListItem::new(url.as_str(), GSB_IDENTIFIER, classification)
                })
            });
            Ok(Box::new(items) as Matches<'a>)
        })
    }

    fn filter_matching(&self, urls: &[String]) -> Result<Vec<String>, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            let mut seen = HashSet::new();
            let mut matching = Vec::new();
            for found in self.matches(urls) {
                let (url, _) = found?;
                if seen.insert(url.as_str()) {
                    matching.push(url.clone());
                }
            }
            Ok(matching)
        })
    }
}

impl<C> std::fmt::Debug for GoogleSafeBrowsing<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSafeBrowsing")
            .field("client_name", &self.client_name)
            .field("app_version", &self.app_version)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
