//! URL testers.
//!
//! A tester is any denylist source that can answer three questions about a
//! batch of URLs:
//! - `any_match` - is at least one URL listed?
//! - `lookup_matching` - which entries match, and how are they classified?
//! - `filter_matching` - which of the URLs are listed?
//!
//! Every host list is a tester (see `host_list`), Google Safe Browsing is a
//! tester in its own right, and `UrlTesterChain` composes any number of them.

mod chain;

pub use chain::UrlTesterChain;

use crate::error_handling::DenylistError;
use crate::models::AddressListItem;

/// Lazy sequence of matches produced by `lookup_matching`.
///
/// Source errors surface as `Err` items; collecting into
/// `Result<Vec<_>, _>` stops at the first one.
pub type Matches<'a> = Box<dyn Iterator<Item = Result<AddressListItem, DenylistError>> + 'a>;

/// Capability set shared by every denylist source.
///
/// All three operations validate the whole batch first and fail with
/// `DenylistError::InvalidUrl` before querying anything.
pub trait UrlTester {
    /// Identifier recorded as the `source` of every produced match.
    fn source_id(&self) -> &str;

    fn any_match(&self, urls: &[String]) -> Result<bool, DenylistError>;

    fn lookup_matching<'a>(&'a self, urls: &'a [String]) -> Result<Matches<'a>, DenylistError>;

    /// Matching URLs in input order, without duplicates.
    fn filter_matching(&self, urls: &[String]) -> Result<Vec<String>, DenylistError>;
}
