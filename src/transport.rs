//! HTTP plumbing for the search request.
//!
//! The searcher only sees [`Transport`], so tests can hand it canned pages
//! instead of talking to the network.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

use crate::config::{CONFIG, DEFAULT_BASE_URL};
use crate::error::SearchError;

/// Settings for the outbound client. Nothing is implicit: base URL, timeout
/// and extra headers all live here.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build from the environment-backed [`CONFIG`].
    pub fn from_env() -> Self {
        ClientConfig {
            base_url: CONFIG.base_url.clone(),
            timeout: CONFIG.timeout_secs.map(Duration::from_secs),
            headers: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Base URL without a trailing slash.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Fetches a page body. Non-2xx responses are errors.
pub trait Transport {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send {
        (**self).fetch(url)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<HttpTransport, SearchError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SearchError::Transport(format!("invalid header name {name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| SearchError::Transport(format!("invalid value for {name}: {e}")))?;
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = res.text().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_strips_trailing_slashes() {
        let config = ClientConfig::new("https://archive-it.org/");
        assert_eq!(config.origin(), "https://archive-it.org");
    }

    #[test]
    fn default_has_no_timeout_or_headers() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn rejects_invalid_header_names() {
        let config = ClientConfig::default().with_header("bad header", "x");
        let err = HttpTransport::new(&config).err().expect("header should be rejected");
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
