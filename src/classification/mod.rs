//! Classification codes.
//!
//! Denylist sources answer with a raw numeric code. A classification resolver
//! turns that code into a `Classification`, the set of labels explaining why
//! a host or URL is listed.
//!
//! Two decoding strategies are provided:
//! - `SimpleClassificationCodeResolver` - direct table lookup
//! - `SumClassificationCodeResolver` - bitmask decomposition over power-of-two flags

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error_handling::UnknownCodeError;

/// A set of classification labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Classification(BTreeSet<String>);

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, label: impl Into<String>) {
        self.0.insert(label.into());
    }

    pub(crate) fn extend(&mut self, other: Classification) {
        self.0.extend(other.0);
    }
}

impl<S: Into<String>> FromIterator<S> for Classification {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.iter().collect();
        f.write_str(&labels.join(", "))
    }
}

/// Translates a source's raw response code into a classification.
pub trait ClassificationResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns `UnknownCodeError` if the code is not covered by the resolver's table.
    fn resolve(&self, code: u32) -> Result<Classification, UnknownCodeError>;
}

/// Maps each code directly to one label.
#[derive(Debug, Clone)]
pub struct SimpleClassificationCodeResolver {
    table: BTreeMap<u32, String>,
}

impl SimpleClassificationCodeResolver {
    pub fn new<I, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            table: table.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl ClassificationResolver for SimpleClassificationCodeResolver {
    fn resolve(&self, code: u32) -> Result<Classification, UnknownCodeError> {
        self.table
            .get(&code)
            .map(|label| std::iter::once(label.clone()).collect())
            .ok_or(UnknownCodeError { code })
    }
}

/// Decodes a code that is the sum of power-of-two flags.
///
/// Flags are stripped greedily from the largest, each at most once. The code
/// must decompose with no remainder; a partial decomposition is an error, never
/// a partial classification.
#[derive(Debug, Clone)]
pub struct SumClassificationCodeResolver {
    table: BTreeMap<u32, String>,
}

impl SumClassificationCodeResolver {
    pub fn new<I, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            table: table.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl ClassificationResolver for SumClassificationCodeResolver {
    fn resolve(&self, code: u32) -> Result<Classification, UnknownCodeError> {
        let mut remaining = code;
        let mut classification = Classification::new();

        for (&flag, label) in self.table.iter().rev() {
            if flag != 0 && flag <= remaining {
                remaining -= flag;
                classification.insert(label.clone());
            }
        }

        if remaining != 0 || classification.is_empty() {
            return Err(UnknownCodeError { code });
        }
        Ok(classification)
    }
}
