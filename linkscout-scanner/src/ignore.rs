use std::collections::HashSet;

use crate::normalize::normalize_href;

/// Documents that appear on every product page and carry no product
/// information, so their presence or absence means nothing for parity.
const DEFAULT_IGNORED_URLS: &[&str] =
    &["https://htspoly.com/wp-content/uploads/credit-application.pdf"];

/// Deny-list of known-irrelevant document URLs.
///
/// Entries are stored normalized and probes are normalized before
/// lookup, so cosmetic variants of an ignored URL are excluded too.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    normalized: HashSet<String>,
}

impl IgnoreList {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            normalized: urls
                .into_iter()
                .map(|url| normalize_href(url.as_ref()))
                .collect(),
        }
    }

    /// An empty list, for callers that want every link reported.
    pub fn none() -> Self {
        Self {
            normalized: HashSet::new(),
        }
    }

    pub fn contains(&self, href: &str) -> bool {
        self.normalized.contains(&normalize_href(href))
    }

    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_URLS.iter().copied())
    }
}
