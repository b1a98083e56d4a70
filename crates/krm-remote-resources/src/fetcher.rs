//! Retrieval of remote resource payloads

use async_trait::async_trait;
use krm_core::{Error, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Fetches the raw bytes behind a URL
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch `url`, failing with a network error naming it
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetcher for `http://`, `https://` and `file://` URLs.
///
/// Non-2xx responses are errors. Requests are never retried.
pub struct UrlFetcher {
    client: Client,
}

impl UrlFetcher {
    /// Create a fetcher with a default HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("krm-remote-resources/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| client_error(&e))?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(url, error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(url, error_chain(&e)))?;
        Ok(body.to_vec())
    }

    fn fetch_file(url: &str, parsed: &Url) -> Result<Vec<u8>> {
        let path = parsed
            .to_file_path()
            .map_err(|_| Error::network(url, "not a local file path"))?;
        std::fs::read(&path).map_err(|e| Error::network(url, e.to_string()))
    }
}

#[async_trait]
impl ResourceFetcher for UrlFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url).map_err(|e| Error::network(url, format!("invalid URL: {e}")))?;

        let data = match parsed.scheme() {
            "http" | "https" => self.fetch_http(url).await?,
            "file" => Self::fetch_file(url, &parsed)?,
            other => {
                return Err(Error::network(
                    url,
                    format!("unsupported URL scheme: {other}"),
                ))
            }
        };

        debug!("Fetched {} bytes from {}", data.len(), url);
        Ok(data)
    }
}

/// HTTP client construction failures are local, not tied to any URL
fn client_error(err: &dyn std::error::Error) -> Error {
    Error::Io(std::io::Error::other(format!(
        "failed to build HTTP client: {}",
        error_chain(err)
    )))
}

/// Render an error with all of its sources, outermost first
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
