use std::collections::BTreeMap;

use futures::future;
use linkscout_scanner::{DocumentLink, FetchResult, LinkExtractor, normalize_href};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::catalogue::{Catalogue, Product};
use crate::report::{CatalogueReport, ComparisonReport, ParityStatus};

/// The only fatal path in the core: a comparison request that cannot
/// even be attempted. Fetch failures are never errors here; they are
/// carried inside the report.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field} URL '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Input to a single product comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub live: String,
    #[serde(default)]
    pub micro: String,
}

impl CompareRequest {
    /// Fails fast before any fetch is attempted.
    fn validate(&self) -> Result<(), CompareError> {
        for (field, value) in [("live", &self.live), ("micro", &self.micro)] {
            if value.is_empty() {
                return Err(CompareError::MissingField(field));
            }
            Url::parse(value).map_err(|source| CompareError::InvalidUrl {
                field,
                value: value.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl From<&Product> for CompareRequest {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            live: product.live.clone(),
            micro: product.micro.clone(),
        }
    }
}

/// Runs the extractor against both sides of a product and reduces the
/// two link sets to a [`ComparisonReport`].
pub struct ProductComparator {
    extractor: LinkExtractor,
}

impl ProductComparator {
    pub fn new() -> Self {
        Self {
            extractor: LinkExtractor::new(),
        }
    }

    pub fn with_extractor(extractor: LinkExtractor) -> Self {
        Self { extractor }
    }

    /// Compare one product. The live and micro fetches have no data
    /// dependency and run concurrently, each under its own timeout.
    pub async fn compare(&self, request: &CompareRequest) -> Result<ComparisonReport, CompareError> {
        request.validate()?;
        debug!("Comparing {} ({} vs {})", request.name, request.live, request.micro);

        let (live, micro) = tokio::join!(
            self.extractor.fetch_doc_links(&request.live),
            self.extractor.fetch_doc_links(&request.micro),
        );

        Ok(build_report(request, live, micro))
    }

    /// Compare every product in every category. All comparisons run
    /// concurrently; results are collected by index so the output
    /// always follows catalogue order, never completion order.
    pub async fn compare_catalogue(
        &self,
        catalogue: &Catalogue,
    ) -> Result<CatalogueReport, CompareError> {
        info!(
            "Comparing {} product(s) across {} categories",
            catalogue.product_count(),
            catalogue.len()
        );

        let sections = future::join_all(catalogue.categories().iter().map(|category| {
            let product_futures: Vec<_> = category
                .products
                .iter()
                .map(|product| {
                    let request = CompareRequest::from(product);
                    async move { self.compare(&request).await }
                })
                .collect();
            async move {
                let reports = future::join_all(product_futures)
                    .await
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, CompareError>((category.name.clone(), reports))
            }
        }))
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        Ok(CatalogueReport::new(sections))
    }
}

impl Default for ProductComparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure reduction of two fetch results to a report. Keys that
/// normalize equal are treated as one document; hrefs are grouped by
/// key but never rewritten in the output.
fn build_report(
    request: &CompareRequest,
    live: FetchResult,
    micro: FetchResult,
) -> ComparisonReport {
    let live_by_key = key_by_normalized(&live.links);
    let micro_by_key = key_by_normalized(&micro.links);

    let mut matched = Vec::new();
    let mut missing_from_micro = Vec::new();
    for (key, link) in &live_by_key {
        if micro_by_key.contains_key(key) {
            matched.push(link.href.clone());
        } else {
            missing_from_micro.push(link.href.clone());
        }
    }
    let mut extra_on_micro: Vec<String> = micro_by_key
        .iter()
        .filter(|(key, _)| !live_by_key.contains_key(*key))
        .map(|(_, link)| link.href.clone())
        .collect();

    matched.sort();
    missing_from_micro.sort();
    extra_on_micro.sort();

    // Extra-only keys never force a mismatch; only documents the live
    // site has and the mirror lacks count against parity.
    let status = if live.error.is_some() || micro.error.is_some() {
        ParityStatus::Error
    } else if live_by_key.is_empty() {
        ParityStatus::NoDocs
    } else if !missing_from_micro.is_empty() {
        ParityStatus::Mismatch
    } else {
        ParityStatus::Ok
    };

    ComparisonReport {
        name: request.name.clone(),
        live: request.live.clone(),
        micro: request.micro.clone(),
        live_error: live.error,
        micro_error: micro.error,
        live_links: live_by_key.into_values().collect(),
        micro_links: micro_by_key.into_values().collect(),
        matched,
        missing_from_micro,
        extra_on_micro,
        status,
    }
}

/// Maps normalized key to the first-seen link carrying that key.
/// BTreeMap iteration gives the sorted-by-key per-side link lists.
fn key_by_normalized(links: &[DocumentLink]) -> BTreeMap<String, DocumentLink> {
    let mut by_key = BTreeMap::new();
    for link in links {
        by_key
            .entry(normalize_href(&link.href))
            .or_insert_with(|| link.clone());
    }
    by_key
}
