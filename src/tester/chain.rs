//! Composition of several URL testers.

use std::collections::HashSet;

use log::debug;

use super::{Matches, UrlTester};
use crate::error_handling::DenylistError;
use crate::validation::accepts_valid_urls;

/// Identifier used when a chain itself is asked for its source id.
const CHAIN_SOURCE_ID: &str = "url_tester_chain";

/// Fans a URL batch out across independent testers.
///
/// Testers are queried sequentially in registration order. No tester's error
/// is suppressed: the first failure ends the operation.
#[derive(Default)]
pub struct UrlTesterChain {
    url_testers: Vec<Box<dyn UrlTester>>,
}

impl std::fmt::Debug for UrlTesterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlTesterChain")
            .field(
                "url_testers",
                &self.url_testers.iter().map(|t| t.source_id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl UrlTesterChain {
    pub fn new(url_testers: Vec<Box<dyn UrlTester>>) -> Self {
        Self { url_testers }
    }

    /// Appends a tester; it is queried after all previously registered ones.
    pub fn push(&mut self, tester: Box<dyn UrlTester>) {
        self.url_testers.push(tester);
    }

    pub fn url_testers(&self) -> &[Box<dyn UrlTester>] {
        &self.url_testers
    }

    pub fn len(&self) -> usize {
        self.url_testers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url_testers.is_empty()
    }
}

impl UrlTester for UrlTesterChain {
    fn source_id(&self) -> &str {
        CHAIN_SOURCE_ID
    }

    fn any_match(&self, urls: &[String]) -> Result<bool, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            for tester in &self.url_testers {
                if tester.any_match(urls)? {
                    debug!("{} reported a match", tester.source_id());
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    fn lookup_matching<'a>(&'a self, urls: &'a [String]) -> Result<Matches<'a>, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            let mut items = self
                .url_testers
                .iter()
                .flat_map(move |tester| match tester.lookup_matching(urls) {
                    Ok(matches) => matches,
                    Err(e) => Box::new(std::iter::once(Err(e))) as Matches<'a>,
                });

            // Nothing is pulled from later sources once an error was yielded
            let mut failed = false;
            let mut seen = HashSet::new();
            let matches = std::iter::from_fn(move || {
                if failed {
                    return None;
                }
                loop {
                    let item = items.next()?;
                    match &item {
                        Ok(found) if !seen.insert(found.clone()) => continue,
                        Ok(_) => {}
                        Err(_) => failed = true,
                    }
                    return Some(item);
                }
            });

            Ok(Box::new(matches) as Matches<'a>)
        })
    }

    fn filter_matching(&self, urls: &[String]) -> Result<Vec<String>, DenylistError> {
        accepts_valid_urls(urls, |urls| {
            let mut matching = HashSet::new();
            for tester in &self.url_testers {
                matching.extend(tester.filter_matching(urls)?);
            }

            let mut emitted = HashSet::new();
            Ok(urls
                .iter()
                .filter(|u| matching.contains(*u) && emitted.insert(u.as_str()))
                .cloned()
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::classification::Classification;
    use crate::error_handling::UnknownCodeError;
    use crate::models::AddressListItem;

    /// Tester listing a fixed set of URLs, optionally failing every call.
    struct FakeTester {
        id: String,
        listed: Vec<String>,
        fail_with_unknown_code: bool,
        calls: Cell<usize>,
    }

    impl FakeTester {
        fn new(id: &str, listed: &[&str]) -> Self {
            Self {
                id: id.to_string(),
                listed: listed.iter().map(|u| u.to_string()).collect(),
                fail_with_unknown_code: false,
                calls: Cell::new(0),
            }
        }

        fn failing(id: &str) -> Self {
            Self {
                fail_with_unknown_code: true,
                ..Self::new(id, &[])
            }
        }

        fn record_call(&self) -> Result<(), DenylistError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_with_unknown_code {
                return Err(UnknownCodeError { code: 99 }.into());
            }
            Ok(())
        }

        fn item(&self, url: &str) -> AddressListItem {
            AddressListItem::new(url, self.id.as_str(), classification())
        }
    }

    impl UrlTester for FakeTester {
        fn source_id(&self) -> &str {
            &self.id
        }

        fn any_match(&self, urls: &[String]) -> Result<bool, DenylistError> {
            self.record_call()?;
            Ok(urls.iter().any(|u| self.listed.contains(u)))
        }

        fn lookup_matching<'a>(
            &'a self,
            urls: &'a [String],
        ) -> Result<Matches<'a>, DenylistError> {
            self.record_call()?;
            Ok(Box::new(
                urls.iter()
                    .filter(|u| self.listed.contains(u))
                    .map(|u| Ok(self.item(u))),
            ))
        }

        fn filter_matching(&self, urls: &[String]) -> Result<Vec<String>, DenylistError> {
            self.record_call()?;
            Ok(urls
                .iter()
                .filter(|u| self.listed.contains(u))
                .cloned()
                .collect())
        }
    }

    fn classification() -> Classification {
        ["TEST"].into_iter().collect()
    }

    fn urls(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_chain() -> UrlTesterChain {
        UrlTesterChain::new(vec![
            Box::new(FakeTester::new(
                "source_1",
                &["http://55.44.21.12", "https://abc.com", "http://[2001:ddd:ccc:111::22]"],
            )),
            Box::new(FakeTester::new(
                "source_2",
                &["http://55.44.21.12", "http://[2001:ddd:ccc:111::22]"],
            )),
            Box::new(FakeTester::new(
                "source_3",
                &["http://test.com", "http://[2001:abc:111:22::33]"],
            )),
        ])
    }

    #[test]
    fn test_any_match_returns_true_for_matching_urls() {
        let chain = sample_chain();
        assert!(chain.any_match(&urls(&["http://test.com"])).unwrap());
        assert!(chain
            .any_match(&urls(&["http://clean.com", "https://abc.com"]))
            .unwrap());
    }

    #[test]
    fn test_any_match_returns_false_when_no_source_matches() {
        let chain = sample_chain();
        assert!(!chain.any_match(&urls(&["http://clean.com"])).unwrap());
        assert!(!UrlTesterChain::default().any_match(&urls(&["http://a.com"])).unwrap());
    }

    #[test]
    fn test_any_match_short_circuits_across_sources() {
        let first = FakeTester::new("first", &["http://listed.com"]);
        let chain = UrlTesterChain::new(vec![
            Box::new(first),
            Box::new(FakeTester::failing("second")),
        ]);
        // The failing second source is never consulted
        assert!(chain.any_match(&urls(&["http://listed.com"])).unwrap());
    }

    #[test]
    fn test_lookup_matching_preserves_source_identity() {
        let chain = sample_chain();
        let input = urls(&[
            "http://55.44.21.12",
            "http://test.com",
            "https://abc.com",
            "http://[2001:ddd:ccc:111::22]",
            "http://[2001:abc:111:22::33]",
            "http://clean.com",
        ]);
        let actual: HashSet<AddressListItem> = chain
            .lookup_matching(&input)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        let expected: HashSet<AddressListItem> = [
            ("http://55.44.21.12", "source_1"),
            ("http://55.44.21.12", "source_2"),
            ("http://test.com", "source_3"),
            ("https://abc.com", "source_1"),
            ("http://[2001:ddd:ccc:111::22]", "source_1"),
            ("http://[2001:ddd:ccc:111::22]", "source_2"),
            ("http://[2001:abc:111:22::33]", "source_3"),
        ]
        .into_iter()
        .map(|(u, s)| AddressListItem::new(u, s, classification()))
        .collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_lookup_matching_for_no_matching_url() {
        let chain = sample_chain();
        let input = urls(&["http://clean.com"]);
        assert_eq!(chain.lookup_matching(&input).unwrap().count(), 0);
    }

    #[test]
    fn test_lookup_matching_removes_duplicate_items() {
        let chain = UrlTesterChain::new(vec![Box::new(FakeTester::new(
            "source_1",
            &["http://dup.com"],
        ))]);
        let input = urls(&["http://dup.com", "http://dup.com"]);
        let items: Vec<_> = chain.lookup_matching(&input).unwrap().collect();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_lookup_matching_is_lazy() {
        let chain = UrlTesterChain::new(vec![
            Box::new(FakeTester::new("first", &["http://listed.com"])),
            Box::new(FakeTester::new("second", &["http://listed.com"])),
        ]);
        let input = urls(&["http://listed.com"]);
        let mut matches = chain.lookup_matching(&input).unwrap();
        let first = matches.next().unwrap().unwrap();
        assert_eq!(first.source, "first");
        drop(matches);
    }

    #[test]
    fn test_filter_matching_for() {
        let chain = sample_chain();
        let input = urls(&[
            "http://clean.com",
            "http://test.com",
            "http://55.44.21.12",
            "http://test.com",
        ]);
        assert_eq!(
            chain.filter_matching(&input).unwrap(),
            urls(&["http://test.com", "http://55.44.21.12"])
        );

        let clean = urls(&["http://clean.com"]);
        assert!(chain.filter_matching(&clean).unwrap().is_empty());
    }

    #[test]
    fn test_operations_raise_invalid_url_error() {
        let chain = sample_chain();
        let input = urls(&["http://test.com", "invalid.url.com"]);
        assert!(matches!(
            chain.any_match(&input),
            Err(DenylistError::InvalidUrl { .. })
        ));
        assert!(matches!(
            chain.lookup_matching(&input).map(|_| ()),
            Err(DenylistError::InvalidUrl { .. })
        ));
        assert!(matches!(
            chain.filter_matching(&input),
            Err(DenylistError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_operations_do_not_handle_unknown_code_error() {
        for position in 0..3 {
            let mut testers: Vec<Box<dyn UrlTester>> = vec![
                Box::new(FakeTester::new("a", &[])),
                Box::new(FakeTester::new("b", &[])),
            ];
            testers.insert(position, Box::new(FakeTester::failing("bad")));
            let chain = UrlTesterChain::new(testers);
            let input = urls(&["http://triggeringerror.com"]);

            assert!(matches!(
                chain.any_match(&input),
                Err(DenylistError::UnknownCode(_))
            ));
            assert!(matches!(
                chain.filter_matching(&input),
                Err(DenylistError::UnknownCode(_))
            ));
            let collected: Result<Vec<_>, _> = chain.lookup_matching(&input).unwrap().collect();
            assert!(matches!(collected, Err(DenylistError::UnknownCode(_))));
        }
    }

    #[test]
    fn test_lookup_matching_stops_after_error() {
        let chain = UrlTesterChain::new(vec![
            Box::new(FakeTester::failing("bad")),
            Box::new(FakeTester::new("good", &["http://listed.com"])),
        ]);
        let input = urls(&["http://listed.com"]);
        let items: Vec<_> = chain.lookup_matching(&input).unwrap().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }
}
