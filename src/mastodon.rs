use crate::{
    domain::PublishTarget,
    errors::PublishError,
    models::{MediaHandle, MediaResponse, StatusPost},
};
use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use std::{fmt, path::Path};
use tracing::{self, instrument};
use url::Url;

const MEDIA_ENDPOINT: &str = "/api/v1/media";
const STATUS_ENDPOINT: &str = "/api/v1/statuses";
const MEDIA_FIELD: &str = "file";

/// Publishes memes to a Mastodon-compatible server.
#[derive(Clone)]
pub struct MastodonClient {
    client: Client,
    media_url: String,
    status_url: String,
    access_token: String,
}

impl MastodonClient {
    pub fn new(client: Client, mastodon_url: &Url, access_token: String) -> Self {
        let base = mastodon_url.as_str().trim_end_matches('/');
        tracing::info!(mastodon_url = %base, "Initializing MastodonClient");
        Self {
            client,
            media_url: format!("{}{}", base, MEDIA_ENDPOINT),
            status_url: format!("{}{}", base, STATUS_ENDPOINT),
            access_token,
        }
    }

    fn media_error(&self, reason: impl Into<String>) -> PublishError {
        PublishError::MediaUpload { url: self.media_url.clone(), reason: reason.into() }
    }

    fn status_error(&self, reason: impl Into<String>) -> PublishError {
        PublishError::StatusPublish { url: self.status_url.clone(), reason: reason.into() }
    }
}

// The access token stays out of logs.
impl fmt::Debug for MastodonClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MastodonClient")
            .field("media_url", &self.media_url)
            .field("status_url", &self.status_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Builds the single-file multipart body for a media upload.
fn media_form(bytes: Vec<u8>, suggested_name: &str) -> Result<Form, reqwest::Error> {
    let file_name = Path::new(suggested_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| suggested_name.to_string());
    let content_type = mime_guess::from_path(&file_name)
        .first_raw()
        .unwrap_or("application/octet-stream");

    let part = Part::bytes(bytes).file_name(file_name).mime_str(content_type)?;
    Ok(Form::new().part(MEDIA_FIELD, part))
}

#[async_trait]
impl PublishTarget for MastodonClient {
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    async fn upload_media(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<MediaHandle, PublishError> {
        let form = media_form(bytes, suggested_name)
            .map_err(|e| self.media_error(format!("error creating multipart form data: {}", e)))?;

        let response = self
            .client
            .post(&self.media_url)
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.media_error(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.media_error(format!("error reading media response body: {}", e)))?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Media upload rejected");
            return Err(self.media_error(format!(
                "received code {} with response body: {}",
                status.as_u16(),
                body
            )));
        }

        let media: MediaResponse = serde_json::from_str(&body)
            .map_err(|e| self.media_error(format!("error parsing media response body: {}", e)))?;

        let handle = MediaHandle::new(media.id).ok_or_else(|| self.media_error("no media id returned"))?;
        tracing::debug!(media_id = %handle, "Media uploaded");
        Ok(handle)
    }

    #[instrument(skip(self, status), fields(media_id = %media, sensitive = status.sensitive))]
    async fn create_status(&self, status: &StatusPost, media: &MediaHandle) -> Result<(), PublishError> {
        let sensitive = if status.sensitive { "true" } else { "false" };
        let form = [
            ("status", status.text.as_str()),
            ("media_ids[]", media.as_str()),
            ("sensitive", sensitive),
            ("spoiler_text", status.spoiler_text.as_str()),
        ];

        let response = self
            .client
            .post(&self.status_url)
            .bearer_auth(&self.access_token)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.status_error(e.to_string()))?;

        let code = response.status();
        if !code.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %code, body = %body, "Status publish rejected");
            return Err(self.status_error(format!(
                "received code {} with response body: {}",
                code.as_u16(),
                body
            )));
        }

        tracing::debug!("Status created");
        Ok(())
    }
}
