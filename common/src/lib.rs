//! Shared data model for the job listing crawler.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Salary value used when a listing does not show one.
pub const NOT_MENTIONED: &str = "Not Mentioned";

/// One search-results request: a job position in a city, at a given page offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub job_position: String,
    pub city: String,
    pub radius: u32,
    pub job_type: String,
    pub page_offset: u32,
}

/// A single scraped job listing.
///
/// Deserializing goes through [`ListingRecord::new`], so rows that
/// identify nothing are rejected.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "RawListing")]
pub struct ListingRecord {
    #[serde(rename = "JOB TITLE")]
    title: Option<String>,
    #[serde(rename = "JOB URL")]
    url: Option<String>,
    #[serde(rename = "JOB SUMMARY")]
    summary: Option<String>,
    #[serde(rename = "JOB SALARY")]
    salary: String,
    #[serde(rename = "POSTING DATE")]
    posting_date: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("listing has no title, url or summary")]
pub struct InvalidListing;

/// Row as stored on disk, before the validity rule is applied.
#[derive(Deserialize)]
struct RawListing {
    #[serde(rename = "JOB TITLE")]
    title: Option<String>,
    #[serde(rename = "JOB URL")]
    url: Option<String>,
    #[serde(rename = "JOB SUMMARY")]
    summary: Option<String>,
    #[serde(rename = "JOB SALARY")]
    salary: Option<String>,
    #[serde(rename = "POSTING DATE")]
    posting_date: Option<String>,
}

impl TryFrom<RawListing> for ListingRecord {
    type Error = InvalidListing;

    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        ListingRecord::new(
            raw.title,
            raw.url,
            raw.summary,
            raw.salary,
            raw.posting_date,
        )
        .ok_or(InvalidListing)
    }
}

impl ListingRecord {
    /// Builds a record, or `None` when title, url and summary are all absent.
    ///
    /// A missing or blank salary becomes [`NOT_MENTIONED`].
    pub fn new(
        title: Option<String>,
        url: Option<String>,
        summary: Option<String>,
        salary: Option<String>,
        posting_date: Option<String>,
    ) -> Option<Self> {
        if title.is_none() && url.is_none() && summary.is_none() {
            return None;
        }

        Some(Self {
            title,
            url,
            summary,
            salary: salary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| NOT_MENTIONED.to_string()),
            posting_date,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn posting_date(&self) -> Option<&str> {
        self.posting_date.as_deref()
    }
}

/// All records gathered by one crawl, in crawl order.
///
/// Listings repeated across overlapping result pages are kept as-is.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResultTable {
    records: Vec<ListingRecord>,
}

impl ResultTable {
    pub const COLUMNS: [&'static str; 5] = [
        "JOB TITLE",
        "JOB URL",
        "JOB SUMMARY",
        "JOB SALARY",
        "POSTING DATE",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.records.iter()
    }

    /// Cells of each record in [`ResultTable::COLUMNS`] order.
    pub fn rows(&self) -> impl Iterator<Item = [Option<&str>; 5]> + '_ {
        self.records.iter().map(|r| {
            [
                r.title(),
                r.url(),
                r.summary(),
                Some(r.salary()),
                r.posting_date(),
            ]
        })
    }
}

impl Extend<ListingRecord> for ResultTable {
    fn extend<T: IntoIterator<Item = ListingRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl IntoIterator for ResultTable {
    type Item = ListingRecord;
    type IntoIter = std::vec::IntoIter<ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ListingRecord;
    type IntoIter = std::slice::Iter<'a, ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Search-result URLs that produced no data.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ErrorLog {
    urls: Vec<String>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}
