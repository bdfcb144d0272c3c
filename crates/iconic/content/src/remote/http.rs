//! HTTP dataset source.

use async_trait::async_trait;

use super::{DatasetSource, FetchError, RemotePayload};
use crate::loaders::bundled::{DATASET_FILE, SPRITE_FILE};

/// Fetches `iconic.txt` and `iconic.png` from a base URL.
pub struct HttpDatasetSource {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpDatasetSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn get(&self, resource: &str) -> Result<reqwest::Response, FetchError> {
        let url = self.url(resource);
        tracing::debug!(target: "iconic::data", "Fetching {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

fn transport(resource: &str, error: reqwest::Error) -> FetchError {
    FetchError::Transport {
        resource: resource.to_string(),
        message: error.to_string(),
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self) -> Result<RemotePayload, FetchError> {
        let text = self
            .get(DATASET_FILE)
            .await?
            .text()
            .await
            .map_err(|e| transport(DATASET_FILE, e))?;

        let sprite = self
            .get(SPRITE_FILE)
            .await?
            .bytes()
            .await
            .map_err(|e| transport(SPRITE_FILE, e))?;

        Ok(RemotePayload {
            text: text.trim_end().to_string(),
            sprite: sprite.to_vec(),
        })
    }
}
