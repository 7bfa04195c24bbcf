//! Redirect expansion.
//!
//! - `RedirectUrlResolver` lazily lists the locations a URL redirects through
//! - `UrlsAndLocations` is a restartable URL set that grows with the redirect
//!   targets of its initial URLs during the first traversal, then replays

mod locations;
mod resolver;

pub use locations::{UrlsAndLocations, UrlsAndLocationsIter};
pub use resolver::{RedirectUrlResolver, RedirectUrls, ResolveRedirects};
