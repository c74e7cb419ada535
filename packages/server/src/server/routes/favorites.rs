//! Favorite toggle endpoints

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use catalog::{FavoriteRequest, FavoriteResponse, FavoritesCheckRequest, FavoritesCheckResponse};

use crate::domains::favorites::{add_favorite, check_favorites, remove_favorite, update_note};
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;

/// `POST /api/favorites/check`
pub async fn check_favorites_handler(
    Extension(deps): Extension<ServerDeps>,
    body: Result<Json<FavoritesCheckRequest>, JsonRejection>,
) -> Result<Json<FavoritesCheckResponse>, ApiError> {
    let Json(request) = body?;
    let favorited = check_favorites(deps.favorites.as_ref(), &request.resource_ids).await?;
    Ok(Json(FavoritesCheckResponse { favorited }))
}

/// `POST /api/favorite/add`
pub async fn add_favorite_handler(
    Extension(deps): Extension<ServerDeps>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(add_favorite(deps.favorites.as_ref(), &request).await?))
}

/// `POST /api/favorite/remove`
pub async fn remove_favorite_handler(
    Extension(deps): Extension<ServerDeps>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(remove_favorite(deps.favorites.as_ref(), &request).await?))
}

/// `POST /api/favorite/update-note`
pub async fn update_note_handler(
    Extension(deps): Extension<ServerDeps>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(update_note(deps.favorites.as_ref(), &request).await?))
}
