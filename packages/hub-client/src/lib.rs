//! HTTP client for the Teaching Resources Hub API
//!
//! Implements the catalog's network seams ([`ResourceSource`], [`FavoritesApi`])
//! over `reqwest`, plus the read-only `/api/v1` endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_client::{HubClient, HubClientOptions};
//! use catalog::Autocomplete;
//!
//! let client = HubClient::new(HubClientOptions::new("http://localhost:8080"));
//! let autocomplete = Autocomplete::load(&client).await;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use catalog::{
    ApiError, FavoriteRequest, FavoriteResponse, FavoritesApi, FavoritesCheckRequest,
    FavoritesCheckResponse, Resource, ResourceList, ResourceSource, SearchResponse,
    UserFavoritesResponse,
};

#[derive(Debug, Clone)]
pub struct HubClientOptions {
    /// Server root, e.g. `http://localhost:8080`
    pub base_url: String,
}

impl HubClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HubClient {
    http_client: Client,
    options: HubClientOptions,
}

impl HubClient {
    pub fn new(options: HubClientOptions) -> Self {
        Self {
            http_client: Client::new(),
            options,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.options.base_url
    }

    /// Absolute URL for an API path, with optional query pairs
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let base = self.options.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, path))
            .map_err(|e| ApiError::Transport(format!("invalid URL {}{}: {}", base, path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Attach or replace the note on a favorited resource
    pub async fn update_note(
        &self,
        resource_id: &str,
        notes: &str,
    ) -> Result<FavoriteResponse, ApiError> {
        let body = FavoriteRequest::for_resource(resource_id).with_notes(notes);
        self.post_favorite("/api/favorite/update-note", &body).await
    }

    /// Add with an initial note
    pub async fn add_with_note(
        &self,
        resource_id: &str,
        notes: &str,
    ) -> Result<FavoriteResponse, ApiError> {
        let body = FavoriteRequest::for_resource(resource_id).with_notes(notes);
        self.post_favorite("/api/favorite/add", &body).await
    }

    /// `GET /api/v1/search`
    pub async fn search(
        &self,
        query: &str,
        fields: Option<&str>,
        limit: Option<usize>,
    ) -> Result<SearchResponse, ApiError> {
        let mut params = vec![("q", query.to_string())];
        if let Some(fields) = fields {
            params.push(("fields", fields.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let url = self.endpoint("/api/v1/search", &params)?;
        self.get_json(url).await
    }

    /// `GET /api/v1/user/favorites`
    pub async fn user_favorites(&self) -> Result<UserFavoritesResponse, ApiError> {
        let url = self.endpoint("/api/v1/user/favorites", &[])?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Hub request failed");
                ApiError::Transport(e.to_string())
            })?;

        let response = ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path, &[])?;
        self.http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(path, error = %e, "Hub request failed");
                ApiError::Transport(e.to_string())
            })
    }

    /// Favorite mutations answer `{success, message}` on 4xx too, so the body
    /// is decoded before the status is considered.
    async fn post_favorite(
        &self,
        path: &str,
        body: &FavoriteRequest,
    ) -> Result<FavoriteResponse, ApiError> {
        let response = self.post_json(path, body).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match serde_json::from_str::<FavoriteResponse>(&text) {
            Ok(reply) => {
                debug!(path, status = status.as_u16(), success = reply.success, "Favorite call");
                Ok(reply)
            }
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            }),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<FavoriteResponse>(&body)
        .map(|r| r.message)
        .unwrap_or(body);
    warn!(status = %status, message = %message, "Hub API error");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ResourceSource for HubClient {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiError> {
        let url = self.endpoint("/api/resources", &[])?;
        let list: ResourceList = self.get_json(url).await?;
        Ok(list.resources)
    }
}

#[async_trait]
impl FavoritesApi for HubClient {
    async fn check(&self, resource_ids: &[String]) -> Result<HashMap<String, bool>, ApiError> {
        let body = FavoritesCheckRequest {
            resource_ids: resource_ids.to_vec(),
        };
        let response = self.post_json("/api/favorites/check", &body).await?;
        let reply: FavoritesCheckResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(reply.favorited)
    }

    async fn add(&self, resource_id: &str) -> Result<FavoriteResponse, ApiError> {
        self.post_favorite("/api/favorite/add", &FavoriteRequest::for_resource(resource_id))
            .await
    }

    async fn remove(&self, resource_id: &str) -> Result<FavoriteResponse, ApiError> {
        self.post_favorite("/api/favorite/remove", &FavoriteRequest::for_resource(resource_id))
            .await
    }
}
