//! Wire types and collaborator traits for the hub HTTP API
//!
//! Shared by the server (which produces these bodies) and the client
//! (which consumes them).

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::resource::Resource;

/// `GET /api/resources`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// `POST /api/favorites/check` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritesCheckRequest {
    #[serde(default)]
    pub resource_ids: Vec<String>,
}

/// `POST /api/favorites/check` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritesCheckResponse {
    #[serde(default)]
    pub favorited: HashMap<String, bool>,
}

/// Body of `POST /api/favorite/add`, `/remove` and `/update-note`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteRequest {
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FavoriteRequest {
    pub fn for_resource(resource_id: &str) -> Self {
        Self {
            resource_id: Some(resource_id.to_string()),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// `{success, message}` reply of the favorite mutation endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl FavoriteResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// One hit of `GET /api/v1/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub resource: Resource,
    pub relevance_score: u32,
}

/// `GET /api/v1/search` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub count: usize,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// A favorited resource joined with when and why it was saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub resource: Resource,
    /// RFC 3339 timestamp
    pub favorited_at: String,
    #[serde(default)]
    pub user_note: Option<String>,
}

/// `GET /api/v1/user/favorites` response body, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFavoritesResponse {
    pub success: bool,
    pub count: usize,
    #[serde(default)]
    pub favorites: Vec<FavoriteEntry>,
}

/// Source of the resource list fetched once per page view
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiError>;
}

/// Server-side favorites, reached through add/remove/check calls
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    /// Which of `resource_ids` are favorited. Ids absent from the map are not.
    async fn check(&self, resource_ids: &[String]) -> Result<HashMap<String, bool>, ApiError>;

    async fn add(&self, resource_id: &str) -> Result<FavoriteResponse, ApiError>;

    async fn remove(&self, resource_id: &str) -> Result<FavoriteResponse, ApiError>;
}

/// Fetch the resource list, degrading to an empty list when the call fails
pub async fn load_resources(source: &dyn ResourceSource) -> Vec<Resource> {
    match source.fetch_resources().await {
        Ok(resources) => {
            tracing::info!(count = resources.len(), "Loaded resources");
            resources
        }
        Err(e) => {
            tracing::error!(error = %e, "Error loading resources");
            Vec::new()
        }
    }
}
