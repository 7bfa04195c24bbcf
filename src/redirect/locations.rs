//! Restartable URL set expanded with redirect locations.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use log::warn;

use super::resolver::{RedirectUrls, ResolveRedirects};
use crate::error_handling::DenylistError;
use crate::validation::ensure_valid_urls;

/// Initial URLs followed by every location they redirect to.
///
/// The first traversal yields all initial URLs, then resolves their redirects
/// one initial URL at a time, yielding targets not seen before. Once a
/// traversal runs to completion the set is frozen and later traversals replay
/// it without touching the resolver. Each initial URL is resolved at most once
/// over the lifetime of the instance, and only when a traversal gets past
/// everything already known.
///
/// Traversals share one cache through interior mutability, so the type is
/// not `Sync`.
pub struct UrlsAndLocations<'r> {
    resolver: &'r dyn ResolveRedirects,
    initial: Vec<String>,
    /// Known URLs in yield order.
    urls: RefCell<Vec<String>>,
    seen: RefCell<HashSet<String>>,
    /// Index into `initial` of the next URL to resolve.
    next_initial: Cell<usize>,
    /// Locations of the URL currently being resolved.
    pending: RefCell<Option<RedirectUrls<'r>>>,
    frozen: Cell<bool>,
}

impl<'r> UrlsAndLocations<'r> {
    /// # Errors
    ///
    /// Returns `DenylistError::InvalidUrl` for the first invalid initial URL.
    pub fn new(urls: &[String], resolver: &'r dyn ResolveRedirects) -> Result<Self, DenylistError> {
        ensure_valid_urls(urls)?;

        let mut seen = HashSet::new();
        let initial: Vec<String> = urls
            .iter()
            .filter(|url| seen.insert(url.to_string()))
            .cloned()
            .collect();

        Ok(Self {
            resolver,
            urls: RefCell::new(initial.clone()),
            initial,
            seen: RefCell::new(seen),
            next_initial: Cell::new(0),
            pending: RefCell::new(None),
            frozen: Cell::new(false),
        })
    }

    pub fn iter(&self) -> UrlsAndLocationsIter<'_, 'r> {
        UrlsAndLocationsIter {
            owner: self,
            position: 0,
        }
    }

    /// The deduplicated initial URLs.
    pub fn initial_urls(&self) -> &[String] {
        &self.initial
    }

    /// Returns `true` once a traversal has resolved every initial URL.
    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// Appends the next unseen redirect location to the cache.
    ///
    /// Returns `false` when every initial URL has been resolved.
    fn discover_next(&self) -> bool {
        let mut pending = self.pending.borrow_mut();
        loop {
            if let Some(locations) = pending.as_mut() {
                match locations.next() {
                    Some(location) => {
                        if self.seen.borrow_mut().insert(location.clone()) {
                            self.urls.borrow_mut().push(location);
                            return true;
                        }
                        continue;
                    }
                    None => *pending = None,
                }
            }

            let index = self.next_initial.get();
            let Some(url) = self.initial.get(index) else {
                return false;
            };
            self.next_initial.set(index + 1);

            let resolver: &'r dyn ResolveRedirects = self.resolver;
            match resolver.get_redirect_urls(url) {
                Ok(locations) => *pending = Some(locations),
                Err(e) => warn!("Skipping redirects of {url}: {e}"),
            }
        }
    }
}

impl<'s, 'r> IntoIterator for &'s UrlsAndLocations<'r> {
    type Item = String;
    type IntoIter = UrlsAndLocationsIter<'s, 'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One traversal of a `UrlsAndLocations`.
pub struct UrlsAndLocationsIter<'s, 'r> {
    owner: &'s UrlsAndLocations<'r>,
    position: usize,
}

impl Iterator for UrlsAndLocationsIter<'_, '_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(url) = self.owner.urls.borrow().get(self.position) {
                self.position += 1;
                return Some(url.clone());
            }
            if self.owner.frozen.get() {
                return None;
            }
            if !self.owner.discover_next() {
                self.owner.frozen.set(true);
                return None;
            }
        }
    }
}

impl std::fmt::Debug for UrlsAndLocations<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlsAndLocations")
            .field("initial", &self.initial)
            .field("urls", &self.urls.borrow())
            .field("frozen", &self.frozen.get())
            .finish_non_exhaustive()
    }
}
