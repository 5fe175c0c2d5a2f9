//! Byte transport for channel, manifest and payload URLs.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::Client;

use crate::error::InstallError;

/// A stream of body chunks.
pub type ByteStream = BoxStream<'static, Result<Bytes, InstallError>>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a whole (small) document into memory.
    async fn get(&self, url: &str) -> Result<Bytes, InstallError>;

    /// Open a streaming body for a (potentially large) payload.
    async fn stream(&self, url: &str) -> Result<ByteStream, InstallError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, InstallError> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| InstallError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, InstallError> {
        tracing::info!("Requesting URL: {url}");
        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| InstallError::transport(url, e))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Bytes, InstallError> {
        self.send(url)
            .await?
            .bytes()
            .await
            .map_err(|e| InstallError::transport(url, e))
    }

    async fn stream(&self, url: &str) -> Result<ByteStream, InstallError> {
        let owned = url.to_string();
        let body = self.send(url).await?.bytes_stream();
        Ok(body
            .map(move |chunk| chunk.map_err(|e| InstallError::transport(&owned, e)))
            .boxed())
    }
}
