//! Remote retrieval of the batch index and batch archives
//!
//! The HTTP layer sits behind the [`Transport`] trait so the pipeline can be
//! driven from memory in tests. No retries: every failure is returned as-is.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{BatchId, Metadata};
use async_trait::async_trait;
use tracing::{debug, info};

/// Fetches raw bytes by URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the full body
    ///
    /// Non-2xx responses, transport failures and unreadable bodies are errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client with the configured request timeout
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

/// Derives index/batch URLs and fetches them through a [`Transport`]
pub struct BatchFetcher<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> BatchFetcher<T> {
    /// Create a fetcher for the server described by `config`
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    /// The configuration URLs are derived from
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn transport_for_tests(&self) -> &T {
        &self.transport
    }

    /// Fetch and validate the published batch range
    pub async fn fetch_metadata(&self) -> Result<Metadata> {
        let url = self.config.index_url();
        debug!(%url, "fetching metadata");

        let body = self.transport.get(&url).await?;
        let metadata: Metadata = serde_json::from_slice(&body)?;

        info!(
            oldest = metadata.oldest,
            newest = metadata.newest,
            "meta: oldest {}, newest {}",
            metadata.oldest,
            metadata.newest
        );
        metadata.validate()?;
        Ok(metadata)
    }

    /// Fetch the archive bytes of one batch
    pub async fn fetch_batch(&self, id: BatchId) -> Result<Vec<u8>> {
        let url = self.config.batch_url(id);
        info!(batch = %id, %url, "fetching {}", url);

        let body = self.transport.get(&url).await?;
        debug!(batch = %id, bytes = body.len(), "batch fetched");
        Ok(body)
    }
}
