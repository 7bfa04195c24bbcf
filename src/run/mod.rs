//! Check orchestration.
//!
//! `run_check` is the library entry point used by the binary: it collects the
//! URLs, initializes the shared collaborators, builds the tester chain and
//! looks every URL up, optionally after expanding it with its redirect
//! locations.

mod input;
mod sources;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::config::Config;
use crate::initialization::{init_client, init_redirect_session, init_resolver};
use crate::models::AddressListItem;
use crate::redirect::{RedirectUrlResolver, ResolveRedirects, UrlsAndLocations};
use crate::tester::{UrlTester, UrlTesterChain};

pub use input::{collect_urls, read_urls};
pub use sources::{build_chain, HOSTS_FILE_SOURCE_ID};

/// Results of a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Every URL that was looked up, redirect locations included
    pub checked_urls: Vec<String>,
    /// Matches in the order the sources reported them
    pub matches: Vec<AddressListItem>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl CheckReport {
    /// Returns `true` if no source reported a match.
    pub fn is_clean(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Runs a check with the provided configuration.
///
/// # Errors
///
/// Returns an error if the URL file or hosts file cannot be read, if a
/// collaborator cannot be initialized, if any URL is invalid, or if a source
/// fails.
pub fn run_check(config: &Config) -> Result<CheckReport> {
    let urls = collect_urls(&config.urls, config.file.as_deref())?;

    let dns = Arc::new(init_resolver().context("Failed to initialize DNS resolver")?);
    let http = Arc::new(init_client(config).context("Failed to initialize HTTP client")?);
    let chain = build_chain(config, dns, http)?;

    if config.follow_redirects {
        let session =
            init_redirect_session(config).context("Failed to initialize redirect client")?;
        let resolver = RedirectUrlResolver::new(session);
        check_urls(&chain, &urls, Some(&resolver))
    } else {
        check_urls(&chain, &urls, None)
    }
}

/// Looks `urls` up in `chain`.
///
/// With a redirect resolver, every location the URLs redirect to is checked
/// as well.
///
/// # Errors
///
/// Returns an error if any URL is invalid or a source fails.
pub fn check_urls(
    chain: &UrlTesterChain,
    urls: &[String],
    redirects: Option<&dyn ResolveRedirects>,
) -> Result<CheckReport> {
    let start = Instant::now();

    let checked_urls: Vec<String> = match redirects {
        Some(resolver) => UrlsAndLocations::new(urls, resolver)
            .context("Invalid input URL")?
            .iter()
            .collect(),
        None => urls.to_vec(),
    };

    info!(
        "Checking {} URLs against {} sources",
        checked_urls.len(),
        chain.len()
    );

    let matches = chain
        .lookup_matching(&checked_urls)
        .context("Invalid URL")?
        .collect::<Result<Vec<_>, _>>()
        .context("Denylist lookup failed")?;

    let elapsed_seconds = start.elapsed().as_secs_f64();
    info!(
        "Found {} matches in {:.2}s",
        matches.len(),
        elapsed_seconds
    );

    Ok(CheckReport {
        checked_urls,
        matches,
        elapsed_seconds,
    })
}
