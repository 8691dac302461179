use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::{ConfigError, FetchError};

/// Source of page bodies.
pub trait Fetch {
    /// Fetches `url` once and returns its body.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher. Only a `200 OK` counts as a page.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(transport)?;
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
