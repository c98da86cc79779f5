use crate::{
    domain::MemeSource,
    errors::SourceError,
    models::{Meme, MemeMetadata},
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{self, instrument};
use url::Url;

/// Fetches memes from a meme-metadata API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMemeSource {
    client: Client,
    endpoint: Url,
}

impl HttpMemeSource {
    pub fn new(client: Client, endpoint: Url) -> Self {
        tracing::info!(%endpoint, "Initializing HttpMemeSource");
        Self { client, endpoint }
    }

    async fn fetch_metadata(&self) -> Result<MemeMetadata, SourceError> {
        let url = self.endpoint.as_str();
        let response = self.client.get(self.endpoint.clone()).send().await.map_err(|e| {
            SourceError::MetadataFetch { url: url.to_string(), reason: e.to_string() }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::MetadataFetch {
                url: url.to_string(),
                reason: format!("received code {}", status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| SourceError::MetadataParse {
            url: url.to_string(),
            reason: format!("error reading body: {}", e),
        })?;

        let metadata: MemeMetadata = serde_json::from_slice(&body).map_err(|e| SourceError::MetadataParse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if metadata.image_url.is_empty() {
            return Err(SourceError::MetadataParse {
                url: url.to_string(),
                reason: "metadata has no image url".to_string(),
            });
        }

        tracing::debug!(
            post_link = %metadata.post_link,
            image_url = %metadata.image_url,
            nsfw = metadata.is_nsfw,
            "Meme metadata fetched"
        );
        Ok(metadata)
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self.client.get(image_url).send().await.map_err(|e| SourceError::ImageFetch {
            url: image_url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::ImageFetch {
                url: image_url.to_string(),
                reason: format!("received code {}", status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(|source| SourceError::ImageRead {
            url: image_url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl MemeSource for HttpMemeSource {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Meme, SourceError> {
        let metadata = self.fetch_metadata().await?;
        let image_bytes = self.fetch_image(&metadata.image_url).await?;
        tracing::debug!(bytes = image_bytes.len(), "Meme image downloaded");
        Ok(Meme { image_bytes, metadata })
    }
}
