//! HTTP client for the lightsaber API
//!
//! ```ignore
//! use lightsaber_api::client::LightsaberClient;
//!
//! let client = LightsaberClient::new("http://localhost:3000/api");
//! let sabers = client.fetch_all(&ListFilters::default()).await?;
//! ```

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::rest_api::ApiResponse;
use crate::schema::{Lightsaber, LightsaberPatch, ListFilters, NewLightsaber};

use super::errors::{ClientError, ClientResult};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Typed client over `/lightsabers`
#[derive(Debug, Clone)]
pub struct LightsaberClient {
    http: reqwest::Client,
    base_url: String,
}

impl LightsaberClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/lightsabers", self.base_url)
    }

    /// Collection URL plus `id` as one percent-encoded path segment
    fn item_url(&self, id: &str) -> ClientResult<Url> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{}: not a base URL", self.base_url)))?
            .push(id);

        Ok(url)
    }

    /// Reads the envelope and maps non-success statuses to `ClientError::Api`.
    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();
        let body = resp.text().await?;

        let envelope: Option<ApiResponse<T>> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = envelope
                .and_then(|e| e.error)
                .unwrap_or_else(|| body.trim().to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match envelope {
            Some(ApiResponse { data: Some(data), .. }) => Ok(data),
            Some(_) => Err(ClientError::Decode("response envelope has no data".into())),
            None => Err(ClientError::Decode(format!(
                "response body is not a {} envelope",
                std::any::type_name::<T>()
            ))),
        }
    }

    /// GET /lightsabers with optional filters
    pub async fn fetch_all(&self, filters: &ListFilters) -> ClientResult<Vec<Lightsaber>> {
        let resp = self
            .http
            .get(self.collection_url())
            .query(&filters.to_query())
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// GET /lightsabers/:id
    pub async fn fetch(&self, id: &str) -> ClientResult<Lightsaber> {
        let resp = self.http.get(self.item_url(id)?).send().await?;
        Self::parse(resp).await
    }

    /// POST /lightsabers
    pub async fn create(&self, new: &NewLightsaber) -> ClientResult<Lightsaber> {
        let resp = self.http.post(self.collection_url()).json(new).send().await?;
        Self::parse(resp).await
    }

    /// PATCH /lightsabers/:id
    pub async fn update(&self, id: &str, patch: &LightsaberPatch) -> ClientResult<Lightsaber> {
        let resp = self.http.patch(self.item_url(id)?).json(patch).send().await?;
        Self::parse(resp).await
    }

    /// PUT /lightsabers/:id
    pub async fn replace(&self, id: &str, new: &NewLightsaber) -> ClientResult<Lightsaber> {
        let resp = self.http.put(self.item_url(id)?).json(new).send().await?;
        Self::parse(resp).await
    }

    /// DELETE /lightsabers/:id
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let resp = self.http.delete(self.item_url(id)?).send().await?;

        if resp.status().is_success() {
            return Ok(());
        }
        Self::parse::<serde_json::Value>(resp).await.map(|_| ())
    }

    /// Flips `isActive`: reads the record, then patches the negated value.
    pub async fn toggle_active(&self, id: &str) -> ClientResult<Lightsaber> {
        let current = self.fetch(id).await?;
        let patch = LightsaberPatch {
            is_active: Some(!current.is_active),
            ..Default::default()
        };
        self.update(id, &patch).await
    }
}
