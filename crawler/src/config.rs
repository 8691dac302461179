use std::fs;
use std::path::Path;

use common::SearchParameters;
use serde::Deserialize;

use crate::error::ConfigError;

/// Result offsets advance by one page of the site's listings.
pub const PAGE_STRIDE: u32 = 10;

const DEFAULT_BASE_URL: &str = "https://www.indeed.co.in/jobs?q=";
const DEFAULT_SITE_ORIGIN: &str = "https://www.indeed.co.in";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Everything a crawl needs: what to search for and where.
///
/// Job positions and cities are inserted into the URL verbatim, so they
/// must already be query-encoded (`Data+Scientist`, `Bengaluru%2C+Karnataka`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    pub job_positions: Vec<String>,
    pub cities: Vec<String>,
    pub radius: u32,
    pub job_type: String,
    /// Result pages fetched per (city, job position).
    pub pages: u32,
    pub base_url: String,
    /// Prepended to relative listing links.
    pub site_origin: String,
    pub user_agent: String,
    pub selectors: SiteSelectors,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            job_positions: [
                "Data+Scientist",
                "Data+Analyst",
                "Data+Engineer",
                "Business+Analyst",
                "Machine+Learning+Engineer",
            ]
            .map(String::from)
            .to_vec(),
            cities: vec!["Bengaluru%2C+Karnataka".to_string()],
            radius: 100,
            job_type: "fulltime".to_string(),
            pages: 20,
            base_url: DEFAULT_BASE_URL.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selectors: SiteSelectors::default(),
        }
    }
}

impl CrawlConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_job_positions<I, S>(mut self, positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_positions = positions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = cities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = job_type.into();
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }

    /// Every request of the crawl, in order: city, then job position, then page.
    pub fn plan(&self) -> impl Iterator<Item = SearchParameters> + '_ {
        self.cities.iter().flat_map(move |city| {
            self.job_positions.iter().flat_map(move |job| {
                (0..self.pages).map(move |page| SearchParameters {
                    job_position: job.clone(),
                    city: city.clone(),
                    radius: self.radius,
                    job_type: self.job_type.clone(),
                    page_offset: page_offset(page),
                })
            })
        })
    }
}

/// Result offset of the `page`-th page, saturating at `u32::MAX`.
pub fn page_offset(page: u32) -> u32 {
    page.saturating_mul(PAGE_STRIDE)
}

/// CSS selectors matching the job site's markup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSelectors {
    pub listing: String,
    pub anchor: String,
    pub salary: String,
    pub posting_date: String,
    pub description: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            listing: "div.jobsearch-SerpJobCard".to_string(),
            anchor: "a".to_string(),
            salary: "span.salaryText".to_string(),
            posting_date: "span.date".to_string(),
            description: "div#jobDescriptionText".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_search_bengaluru_data_roles() {
        let config = CrawlConfig::default();
        assert_eq!(config.radius, 100);
        assert_eq!(config.job_type, "fulltime");
        assert_eq!(config.pages, 20);
        assert_eq!(config.base_url, "https://www.indeed.co.in/jobs?q=");
        assert_eq!(config.job_positions.len(), 5);
        assert_eq!(config.cities, ["Bengaluru%2C+Karnataka"]);
    }

    #[test]
    fn test_plan_order_is_city_then_position_then_page() {
        let config = CrawlConfig::default()
            .with_cities(["Pune", "Delhi"])
            .with_job_positions(["Analyst", "Engineer"])
            .with_pages(2);

        let plan: Vec<_> = config
            .plan()
            .map(|p| (p.city, p.job_position, p.page_offset))
            .collect();

        let expected = [
            ("Pune", "Analyst", 0u32),
            ("Pune", "Analyst", 10),
            ("Pune", "Engineer", 0),
            ("Pune", "Engineer", 10),
            ("Delhi", "Analyst", 0),
            ("Delhi", "Analyst", 10),
            ("Delhi", "Engineer", 0),
            ("Delhi", "Engineer", 10),
        ]
        .map(|(c, j, o)| (c.to_string(), j.to_string(), o));
        assert_eq!(plan, expected);
    }

    #[test]
    fn test_zero_pages_plans_nothing() {
        let config = CrawlConfig::default().with_pages(0);
        assert_eq!(config.plan().count(), 0);
    }

    #[test]
    fn test_huge_page_count_does_not_overflow_offsets() {
        assert_eq!(page_offset(429_496_729), 4_294_967_290);
        assert_eq!(page_offset(429_496_730), u32::MAX);
        assert_eq!(page_offset(u32::MAX - 1), u32::MAX);

        let config = CrawlConfig::from_toml_str(&format!("pages = {}", u32::MAX)).unwrap();
        let offsets: Vec<_> = config.plan().take(3).map(|p| p.page_offset).collect();
        assert_eq!(offsets, [0, 10, 20]);
    }

    #[test]
    fn test_toml_overrides_only_given_fields() {
        let config = CrawlConfig::from_toml_str(
            r#"
            cities = ["Mumbai"]
            pages = 3

            [selectors]
            salary = "div.salary-snippet"
            "#,
        )
        .unwrap();

        assert_eq!(config.cities, ["Mumbai"]);
        assert_eq!(config.pages, 3);
        assert_eq!(config.radius, 100);
        assert_eq!(config.selectors.salary, "div.salary-snippet");
        assert_eq!(config.selectors.listing, "div.jobsearch-SerpJobCard");
    }

    #[test]
    fn test_toml_rejects_unknown_fields() {
        let err = CrawlConfig::from_toml_str("retries = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = CrawlConfig::from_toml_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
