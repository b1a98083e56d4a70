//! Resource generation from remote YAML streams

use crate::config::RemoteConfig;
use crate::fetcher::ResourceFetcher;
use krm_core::checksum::validate_sha256;
use krm_core::document::{decode_stream_bytes, Document};
use krm_core::Result;
use tracing::{debug, info};

/// Fetches every configured resource and concatenates their documents
pub struct RemoteResourceGenerator<'a> {
    config: &'a RemoteConfig,
    fetcher: &'a dyn ResourceFetcher,
}

impl<'a> RemoteResourceGenerator<'a> {
    pub fn new(config: &'a RemoteConfig, fetcher: &'a dyn ResourceFetcher) -> Self {
        Self { config, fetcher }
    }

    /// Fetch, verify and decode each resource in configured order.
    ///
    /// The first failure aborts the run; later resources are not fetched.
    pub async fn generate(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for resource in &self.config.resources {
            info!("Fetching {}", resource.url);
            let data = self.fetcher.fetch(&resource.url).await?;

            if let Some(expected) = &resource.sha256 {
                validate_sha256(&resource.url, &data, expected)?;
            }

            let fetched = decode_stream_bytes(&resource.url, &data)?;
            debug!("Decoded {} document(s) from {}", fetched.len(), resource.url);
            documents.extend(fetched);
        }

        Ok(documents)
    }
}
