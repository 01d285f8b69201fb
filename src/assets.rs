//! Loading of presentation assets bundled with the extension

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read asset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches the text of an extension resource
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    /// `path` is extension-relative, e.g. `/assets/css/alert-popup.css`
    async fn fetch_text(&self, path: &str) -> Result<String, AssetError>;
}

/// Fetches resources over HTTP relative to the extension base URL
pub struct HttpAssetFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("toast-relay")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, AssetError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Asset request returned status {}: {}", status, url);
            return Err(AssetError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Reads resources from an unpacked extension directory
pub struct FileAssetFetcher {
    root: PathBuf,
}

impl FileAssetFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl AssetFetcher for FileAssetFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, AssetError> {
        let path = self.root.join(path.trim_start_matches('/'));
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| AssetError::Io { path, source })
    }
}
