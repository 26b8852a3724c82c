use serde::{Deserialize, Serialize};

/// One document-file hyperlink found on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    /// Absolute URL, exactly as resolved against the page URL.
    pub href: String,
    /// Visible anchor text, or "(no text)" when the anchor is empty.
    pub text: String,
    /// Heading-like text inferred from the surrounding markup; may be empty.
    pub title: String,
}

/// Outcome of fetching one page and extracting its document links.
///
/// Fetch failures are carried in `error` instead of propagating, so a
/// comparison can always consume both sides of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    pub url: String,
    pub links: Vec<DocumentLink>,
    pub error: Option<String>,
}

impl FetchResult {
    pub fn new(url: String, links: Vec<DocumentLink>) -> Self {
        Self {
            url,
            links,
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            links: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
