//! Redirect chain resolution.

use std::mem;

use log::{debug, warn};

use crate::error_handling::{DenylistError, TransportError};
use crate::fetch::{resolve_location, HttpResponse, RedirectChain, RedirectSession};
use crate::validation::is_valid_url;

/// Lazy, finite sequence of redirect locations.
pub type RedirectUrls<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Anything able to list the redirect locations of a URL.
pub trait ResolveRedirects {
    /// # Errors
    ///
    /// Returns `DenylistError::InvalidUrl` if `url` is not a valid URL.
    fn get_redirect_urls<'a>(&'a self, url: &str) -> Result<RedirectUrls<'a>, DenylistError>;
}

/// Lists the locations reached by following a URL's redirects.
///
/// The input URL is never part of the output. Transport failures end the
/// sequence instead of erroring:
/// - a connection, timeout or unsupported-scheme failure on the first request
///   gives an empty sequence
/// - the same failures later on end it after the location that could not be
///   reached, if that location is a valid URL
/// - an invalid location ends it without being yielded
#[derive(Debug, Clone)]
pub struct RedirectUrlResolver<S> {
    session: S,
}

impl<S: RedirectSession> RedirectUrlResolver<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Returns the lazy sequence of locations `url` redirects through.
    ///
    /// No request is made until the sequence is first advanced.
    ///
    /// # Errors
    ///
    /// Returns `DenylistError::InvalidUrl` if `url` is not a valid URL.
    pub fn get_redirect_urls<'a>(&'a self, url: &str) -> Result<RedirectUrls<'a>, DenylistError> {
        if !is_valid_url(url) {
            return Err(DenylistError::invalid_url(url));
        }
        Ok(Box::new(Locations {
            session: &self.session,
            state: State::Start(url.to_string()),
        }))
    }
}

impl<S: RedirectSession> ResolveRedirects for RedirectUrlResolver<S> {
    fn get_redirect_urls<'a>(&'a self, url: &str) -> Result<RedirectUrls<'a>, DenylistError> {
        RedirectUrlResolver::get_redirect_urls(self, url)
    }
}

enum State<'a> {
    /// The first request has not been issued yet.
    Start(String),
    /// Walking the chain; `last` is the most recent response received.
    Walking {
        chain: RedirectChain<'a>,
        last: HttpResponse,
    },
    Done,
}

struct Locations<'a, S> {
    session: &'a S,
    state: State<'a>,
}

impl<'a, S: RedirectSession> Iterator for Locations<'a, S> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match mem::replace(&mut self.state, State::Done) {
                State::Start(url) => match self.session.head(&url) {
                    Ok(response) => {
                        let chain = self.session.resolve_redirects(&response);
                        self.state = State::Walking {
                            chain,
                            last: response,
                        };
                    }
                    Err(e) => {
                        log_chain_end(&url, &e);
                        return None;
                    }
                },
                State::Walking { mut chain, last } => {
                    return match chain.next()? {
                        Ok(response) if is_valid_url(&response.url) => {
                            let location = response.url.clone();
                            self.state = State::Walking {
                                chain,
                                last: response,
                            };
                            Some(location)
                        }
                        Ok(response) => {
                            debug!("Redirect chain reached invalid location {}", response.url);
                            None
                        }
                        Err(e) if e.keeps_pending_location() => {
                            log_chain_end(&last.url, &e);
                            last.location()
                                .and_then(|location| resolve_location(&last.url, location))
                                .filter(|location| is_valid_url(location))
                        }
                        Err(e) => {
                            log_chain_end(&last.url, &e);
                            None
                        }
                    };
                }
                State::Done => return None,
            }
        }
    }
}

fn log_chain_end(url: &str, error: &TransportError) {
    match error {
        TransportError::Connection(_)
        | TransportError::Timeout(_)
        | TransportError::InvalidSchema(_)
        | TransportError::InvalidUrl(_) => {
            debug!("Redirect chain from {url} truncated: {error}")
        }
        _ => warn!("Redirect chain from {url} aborted: {error}"),
    }
}
