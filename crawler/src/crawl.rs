//! Sequential crawl over every (city, job position, page) combination.

use chrono::{DateTime, Utc};
use common::{ErrorLog, ListingRecord, ResultTable};
use scraper::Html;

use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::extract::{self, ListingSelectors, PendingListing};
use crate::fetch::Fetch;
use crate::search_url::build_search_url;

/// Outcome of one crawl.
#[derive(Debug)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub table: ResultTable,
    /// Search-result URLs that yielded nothing, in crawl order.
    pub error_log: ErrorLog,
}

impl CrawlReport {
    pub fn is_clean(&self) -> bool {
        self.error_log.is_empty()
    }

    /// Final human-readable report: the failed URLs, or a success line.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "Scraped the website information successfully!".to_string();
        }

        let mut out = String::from("Error occurred in scraping the following urls:");
        for url in self.error_log.iter() {
            out.push_str("\n  ");
            out.push_str(url);
        }
        out
    }
}

/// Runs the whole crawl.
///
/// Fails only if the configured selectors do not compile. Pages that
/// cannot be fetched or have no listings end up in the report's error log
/// and the crawl carries on.
pub fn run<F: Fetch>(
    config: &CrawlConfig,
    fetcher: &F,
    started_at: DateTime<Utc>,
) -> Result<CrawlReport, ConfigError> {
    let selectors = ListingSelectors::compile(&config.selectors)?;

    let mut table = ResultTable::new();
    let mut error_log = ErrorLog::new();

    for params in config.plan() {
        let url = build_search_url(&config.base_url, &params);
        tracing::info!(
            city = %params.city,
            job = %params.job_position,
            offset = params.page_offset,
            %url,
            "scraping search page"
        );

        match scrape_search_page(fetcher, &selectors, &config.site_origin, &url) {
            Some(pending) => {
                let before = table.len();
                table.extend(resolve_details(fetcher, &selectors, pending));
                tracing::debug!(url = %url, records = table.len() - before, "page done");
            }
            None => error_log.record(url),
        }
    }

    tracing::info!(
        records = table.len(),
        failed_pages = error_log.len(),
        "crawl finished"
    );

    Ok(CrawlReport {
        started_at,
        finished_at: Utc::now(),
        table,
        error_log,
    })
}

/// Fetches one search-results page and reads its listings.
///
/// `None` when the page cannot be fetched or holds no listing containers.
pub fn scrape_search_page<F: Fetch>(
    fetcher: &F,
    selectors: &ListingSelectors,
    site_origin: &str,
    url: &str,
) -> Option<Vec<PendingListing>> {
    let body = match fetcher.fetch(url) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url, error = %e, "search page unavailable");
            return None;
        }
    };

    let listings = extract::extract_listings(&Html::parse_document(&body), selectors, site_origin);
    if listings.is_none() {
        tracing::warn!(url, "no listings on search page");
    }
    listings
}

/// Fetches the detail page of each pending listing and keeps the valid records.
pub fn resolve_details<F: Fetch>(
    fetcher: &F,
    selectors: &ListingSelectors,
    pending: Vec<PendingListing>,
) -> Vec<ListingRecord> {
    pending
        .into_iter()
        .filter_map(|listing| {
            let summary = listing
                .detail_url
                .as_deref()
                .and_then(|url| extract::fetch_summary(fetcher, selectors, url));
            let record = listing.into_record(summary);
            if record.is_none() {
                tracing::debug!("dropping listing without title, url or summary");
            }
            record
        })
        .collect()
}
