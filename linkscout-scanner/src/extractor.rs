use ego_tree::NodeRef;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, ScanError};
use crate::ignore::IgnoreList;
use crate::result::{DocumentLink, FetchResult};

/// Document file extensions worth auditing, matched case-insensitively
/// against the URL path (a query string may follow the path).
const DOC_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

/// How many ancestor levels the title inference walks up from an anchor.
const TITLE_SCAN_DEPTH: usize = 5;

/// Anchor text longer than this qualifies as a title candidate.
const MIN_TITLE_LEN: usize = 2;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; LinkScout/1.0)";

/// Fetches a single page and extracts its document-file links.
///
/// Fetch failures (network, timeout, non-2xx status, bad page URL) are
/// captured in the returned [`FetchResult`] rather than propagated, so
/// one broken side never aborts a comparison.
pub struct LinkExtractor {
    client: Client,
    ignore: IgnoreList,
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self::with_timeout(15)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            ignore: IgnoreList::default(),
        }
    }

    pub fn with_ignore_list(mut self, ignore: IgnoreList) -> Self {
        self.ignore = ignore;
        self
    }

    /// Fetch one page and return every document link found on it.
    pub async fn fetch_doc_links(&self, page_url: &str) -> FetchResult {
        debug!("Fetching {}", page_url);
        match self.try_fetch(page_url).await {
            Ok(links) => {
                debug!("Found {} document link(s) on {}", links.len(), page_url);
                FetchResult::new(page_url.to_string(), links)
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", page_url, e);
                FetchResult::with_error(page_url.to_string(), e.to_string())
            }
        }
    }

    async fn try_fetch(&self, page_url: &str) -> Result<Vec<DocumentLink>> {
        let response = self.client.get(page_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                status: status.as_u16(),
                url: page_url.to_string(),
            });
        }
        let body = response.text().await?;
        self.extract_document_links(&body, page_url)
    }

    /// Parse `html` and return its document links, resolved against
    /// `page_url`, ignore-filtered, and deduplicated by exact absolute
    /// URL (first occurrence wins).
    pub fn extract_document_links(&self, html: &str, page_url: &str) -> Result<Vec<DocumentLink>> {
        let base = Url::parse(page_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", page_url, e)))?;

        let document = Html::parse_document(html);
        let selector = Selector::parse("a[href]").unwrap();

        let mut seen = std::collections::HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Ok(absolute) = base.join(href.trim()) else {
                continue;
            };
            if absolute.scheme() != "http" && absolute.scheme() != "https" {
                continue;
            }
            if !is_document_path(absolute.path()) {
                continue;
            }

            let absolute = absolute.to_string();
            if self.ignore.contains(&absolute) {
                continue;
            }
            if !seen.insert(absolute.clone()) {
                continue;
            }

            links.push(DocumentLink {
                href: absolute,
                text: anchor_text(element),
                title: infer_title(element),
            });
        }

        Ok(links)
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the path component names a PDF/DOC/DOCX file. The query
/// string and fragment never reach this test: both are stripped by URL
/// parsing before the path is taken.
fn is_document_path(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Visible text of an anchor, whitespace-collapsed, with a placeholder
/// for anchors that wrap only images or nothing at all.
fn anchor_text(element: ElementRef) -> String {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        "(no text)".to_string()
    } else {
        text
    }
}

/// Walks upward from the anchor looking for a heading-like label.
///
/// At each of up to [`TITLE_SCAN_DEPTH`] ancestor levels, preceding
/// siblings are scanned nearest-first. Sibling anchors are peers of the
/// link, not titles, and are skipped. The first node whose trimmed text
/// exceeds [`MIN_TITLE_LEN`] characters wins; only its first line is
/// kept. Returns an empty string when no level yields a candidate.
fn infer_title(element: ElementRef) -> String {
    let mut node: NodeRef<Node> = *element;
    for _ in 0..TITLE_SCAN_DEPTH {
        for sibling in node.prev_siblings() {
            if sibling
                .value()
                .as_element()
                .is_some_and(|e| e.name() == "a")
            {
                continue;
            }
            if let Some(candidate) = first_line_text(sibling) {
                return candidate;
            }
        }
        match node.parent() {
            Some(parent) => node = parent,
            None => break,
        }
    }
    String::new()
}

/// Trimmed first line of a node's text content, if the content is long
/// enough to be a plausible title.
fn first_line_text(node: NodeRef<Node>) -> Option<String> {
    let text = match node.value() {
        Node::Text(t) => t.to_string(),
        Node::Element(_) => ElementRef::wrap(node)?.text().collect::<String>(),
        _ => return None,
    };

    let trimmed = text.trim();
    if trimmed.len() <= MIN_TITLE_LEN {
        return None;
    }
    let line = trimmed.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
