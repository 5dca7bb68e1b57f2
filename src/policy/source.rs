//! Manifest sources
//!
//! Where widget manifests are loaded from. The engine treats every error
//! from a source as a fetch failure and falls back to the default manifest.

use super::manifest::ManifestDocument;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Default request timeout for HTTP manifest fetches
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Manifest could not be loaded
#[derive(Debug, Error)]
pub enum ManifestFetchError {
    #[error("No manifest published for widget {0}")]
    NotFound(String),
    #[error("Invalid manifest URL: {0}")]
    InvalidUrl(String),
    #[error("Manifest service error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Manifest decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait for manifest loading implementations
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Load the manifest published for a widget
    async fn fetch(&self, widget_id: &str) -> Result<ManifestDocument, ManifestFetchError>;
}

#[async_trait]
impl ManifestSource for Box<dyn ManifestSource> {
    async fn fetch(&self, widget_id: &str) -> Result<ManifestDocument, ManifestFetchError> {
        (**self).fetch(widget_id).await
    }
}

/// Configuration for the HTTP manifest source
#[derive(Debug, Clone)]
pub struct HttpManifestConfig {
    /// Base URL of the manifest service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl HttpManifestConfig {
    /// Configuration for a base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

/// Fetches manifests with `GET {base_url}/widgets/{widget_id}/manifest`
pub struct HttpManifestSource {
    config: HttpManifestConfig,
    client: Client,
}

impl HttpManifestSource {
    /// Create a new source
    pub fn new(config: HttpManifestConfig) -> Result<Self, ManifestFetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Manifest URL for a widget, with the id encoded as one path segment
    pub fn manifest_url(&self, widget_id: &str) -> Result<Url, ManifestFetchError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ManifestFetchError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ManifestFetchError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["widgets", widget_id, "manifest"]);
        Ok(url)
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    async fn fetch(&self, widget_id: &str) -> Result<ManifestDocument, ManifestFetchError> {
        let url = self.manifest_url(widget_id)?;

        tracing::debug!(url = %url, "Fetching widget manifest");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ManifestFetchError::NotFound(widget_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ManifestFetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(ManifestDocument::from_json(&body)?)
    }
}

/// In-memory manifests keyed by widget id
#[derive(Debug, Clone, Default)]
pub struct StaticManifestSource {
    manifests: HashMap<String, ManifestDocument>,
}

impl StaticManifestSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a manifest
    pub fn with_manifest(mut self, widget_id: impl Into<String>, manifest: ManifestDocument) -> Self {
        self.manifests.insert(widget_id.into(), manifest);
        self
    }

    /// Insert or replace a manifest
    pub fn insert(&mut self, widget_id: impl Into<String>, manifest: ManifestDocument) {
        self.manifests.insert(widget_id.into(), manifest);
    }
}

#[async_trait]
impl ManifestSource for StaticManifestSource {
    async fn fetch(&self, widget_id: &str) -> Result<ManifestDocument, ManifestFetchError> {
        self.manifests
            .get(widget_id)
            .cloned()
            .ok_or_else(|| ManifestFetchError::NotFound(widget_id.to_string()))
    }
}
