//! Favorite mutation actions

use catalog::{FavoriteRequest, FavoriteResponse};
use thiserror::Error;
use tracing::info;

use crate::domains::favorites::models::Favorite;
use crate::kernel::BaseFavoriteRepository;

#[derive(Error, Debug)]
pub enum FavoriteError {
    #[error("Resource ID required")]
    MissingResourceId,

    #[error("Already in favorites")]
    AlreadyFavorited,

    #[error("Not in favorites")]
    NotFavorited,

    #[error("Repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

fn require_resource_id(request: &FavoriteRequest) -> Result<&str, FavoriteError> {
    request
        .resource_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(FavoriteError::MissingResourceId)
}

pub async fn add_favorite(
    repo: &dyn BaseFavoriteRepository,
    request: &FavoriteRequest,
) -> Result<FavoriteResponse, FavoriteError> {
    let resource_id = require_resource_id(request)?;
    let favorite = Favorite::new(resource_id, request.notes.as_deref().unwrap_or_default());

    if !repo.insert(favorite).await? {
        return Err(FavoriteError::AlreadyFavorited);
    }

    info!(resource_id, "Favorited resource");
    Ok(FavoriteResponse::ok("Added to favorites!"))
}

pub async fn remove_favorite(
    repo: &dyn BaseFavoriteRepository,
    request: &FavoriteRequest,
) -> Result<FavoriteResponse, FavoriteError> {
    let resource_id = require_resource_id(request)?;

    if !repo.delete(resource_id).await? {
        return Err(FavoriteError::NotFavorited);
    }

    info!(resource_id, "Removed favorite");
    Ok(FavoriteResponse::ok("Removed from favorites"))
}

/// Replace the note; a missing `notes` field clears it
pub async fn update_note(
    repo: &dyn BaseFavoriteRepository,
    request: &FavoriteRequest,
) -> Result<FavoriteResponse, FavoriteError> {
    let resource_id = require_resource_id(request)?;
    let notes = request.notes.as_deref().unwrap_or_default();

    if !repo.update_notes(resource_id, notes).await? {
        return Err(FavoriteError::NotFavorited);
    }

    Ok(FavoriteResponse::ok("Note updated"))
}
