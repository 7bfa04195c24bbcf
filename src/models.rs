use serde::Serialize;

use crate::classification::Classification;

/// A match reported by a denylist source.
///
/// `value` is the matched host or URL, `source` the identifier of the list
/// that produced the match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AddressListItem {
    pub value: String,
    pub source: String,
    pub classification: Classification,
}

impl AddressListItem {
    pub fn new(
        value: impl Into<String>,
        source: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self {
            value: value.into(),
            source: source.into(),
            classification,
        }
    }
}
