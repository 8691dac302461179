//! Job listing crawler
//!
//! Walks search-result pages for every city and job position, extracts
//! the listings on each page and fetches their detail pages for the full
//! description.

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod search_url;

pub use config::CrawlConfig;
pub use crawl::CrawlReport;
pub use error::{ConfigError, FetchError};
pub use fetch::{Fetch, HttpFetcher};
