//! Listing extraction from search-result and detail pages.

use std::sync::LazyLock;

use common::ListingRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::SiteSelectors;
use crate::error::ConfigError;
use crate::fetch::Fetch;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// [`SiteSelectors`] compiled once, reused for every page.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    listing: Selector,
    anchor: Selector,
    salary: Selector,
    posting_date: Selector,
    description: Selector,
}

impl ListingSelectors {
    pub fn compile(selectors: &SiteSelectors) -> Result<Self, ConfigError> {
        Ok(Self {
            listing: parse_selector(&selectors.listing)?,
            anchor: parse_selector(&selectors.anchor)?,
            salary: parse_selector(&selectors.salary)?,
            posting_date: parse_selector(&selectors.posting_date)?,
            description: parse_selector(&selectors.description)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A listing read from a search-results page whose detail page has not
/// been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingListing {
    pub title: Option<String>,
    pub detail_url: Option<String>,
    pub salary: Option<String>,
    pub posting_date: Option<String>,
}

impl PendingListing {
    /// Completes the listing with its summary. `None` if nothing identifies it.
    pub fn into_record(self, summary: Option<String>) -> Option<ListingRecord> {
        ListingRecord::new(
            self.title,
            self.detail_url,
            summary,
            self.salary,
            self.posting_date,
        )
    }
}

/// Reads every listing container on a search-results page.
///
/// Returns `None` when the page has no listing containers at all.
pub fn extract_listings(
    document: &Html,
    selectors: &ListingSelectors,
    site_origin: &str,
) -> Option<Vec<PendingListing>> {
    let listings: Vec<_> = document
        .select(&selectors.listing)
        .map(|container| read_listing(container, selectors, site_origin))
        .collect();

    if listings.is_empty() {
        None
    } else {
        Some(listings)
    }
}

fn read_listing(
    container: ElementRef<'_>,
    selectors: &ListingSelectors,
    site_origin: &str,
) -> PendingListing {
    let anchor = container.select(&selectors.anchor).next();

    let title = anchor
        .and_then(|a| a.value().attr("title"))
        .map(|t| t.trim().to_string());

    let detail_url = anchor
        .and_then(|a| a.value().attr("href"))
        .map(|href| absolute_url(site_origin, href.trim()));

    let salary = container
        .select(&selectors.salary)
        .next()
        .map(collapsed_text)
        .filter(|s| !s.is_empty());

    let posting_date = container
        .select(&selectors.posting_date)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string());

    PendingListing {
        title,
        detail_url,
        salary,
        posting_date,
    }
}

fn absolute_url(site_origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{site_origin}{href}")
    }
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    let text = element.text().collect::<String>();
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Full description text from a listing's detail page.
pub fn extract_summary(document: &Html, selectors: &ListingSelectors) -> Option<String> {
    document
        .select(&selectors.description)
        .next()
        .map(collapsed_text)
        .filter(|s| !s.is_empty())
}

/// Fetches a detail page and extracts its description. Any failure is `None`.
pub fn fetch_summary<F: Fetch>(
    fetcher: &F,
    selectors: &ListingSelectors,
    url: &str,
) -> Option<String> {
    let body = match fetcher.fetch(url) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url, error = %e, "detail page unavailable");
            return None;
        }
    };

    let summary = extract_summary(&Html::parse_document(&body), selectors);
    if summary.is_none() {
        tracing::debug!(url, "detail page has no description");
    }
    summary
}
