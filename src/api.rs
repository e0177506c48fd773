//! Client for the external video metadata API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::{ContentList, VideoDetails};

/// Query parameters the API expects on every call
const DEFAULT_PARAMS: [(&str, &str); 2] = [("hl", "en"), ("gl", "US")];

/// Where views get their data from
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Search results for a free-text query (also used for feed categories)
    async fn search(&self, query: &str) -> Result<ContentList, ApiError>;
    /// Full record of a single video
    async fn video_details(&self, id: &str) -> Result<VideoDetails, ApiError>;
    /// Videos related to the given one
    async fn related_contents(&self, id: &str) -> Result<ContentList, ApiError>;
}

/// HTTP client bound to one base endpoint and access key
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Network)?;

        if config.api_key.is_empty() {
            warn!("no API key configured; requests will likely be rejected");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the absolute URL for a relative path
    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a relative path and return the parsed JSON body
    pub async fn fetch_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.build_url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(&DEFAULT_PARAMS)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<Value>().await?;
        debug!(%url, "response received");
        Ok(body)
    }
}

#[async_trait]
impl VideoSource for ApiClient {
    async fn search(&self, query: &str) -> Result<ContentList, ApiError> {
        let body = self
            .fetch_json(&format!("search/?q={}", urlencoding::encode(query)))
            .await?;
        Ok(decode_or_default(body, "search"))
    }

    async fn video_details(&self, id: &str) -> Result<VideoDetails, ApiError> {
        let body = self
            .fetch_json(&format!("video/details/?id={}", urlencoding::encode(id)))
            .await?;
        Ok(decode_or_default(body, "video details"))
    }

    async fn related_contents(&self, id: &str) -> Result<ContentList, ApiError> {
        let body = self
            .fetch_json(&format!(
                "video/related-contents/?id={}",
                urlencoding::encode(id)
            ))
            .await?;
        Ok(decode_or_default(body, "related contents"))
    }
}

/// Unexpected shapes render as empty rather than failing the view
fn decode_or_default<T: DeserializeOwned + Default>(body: Value, what: &str) -> T {
    serde_json::from_value(body).unwrap_or_else(|err| {
        warn!(error = %err, "unexpected {what} response shape");
        T::default()
    })
}
