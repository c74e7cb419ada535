//! Public REST API (`/api/v1`)

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    Json,
};
use catalog::{Resource, SearchResponse, UserFavoritesResponse};
use serde::{Deserialize, Serialize};

use crate::domains::favorites::list_user_favorites;
use crate::domains::resources::{
    category_details, find_category, list_categories, list_resources, search_resources,
    CategoryDetail, CategorySummary, ResourcePage, ResourceQuery, SearchQuery,
};
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;

#[derive(Serialize)]
pub struct ResourceDetailResponse {
    success: bool,
    resource: Resource,
    favorite_count: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    include_resources: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum CategoryList {
    Summaries(Vec<CategorySummary>),
    Detailed(Vec<CategoryDetail>),
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    success: bool,
    count: usize,
    categories: CategoryList,
}

#[derive(Serialize)]
pub struct CategoryResponse {
    success: bool,
    category: CategoryDetail,
}

/// `GET /api/v1/resources`
pub async fn v1_resources_handler(
    Extension(deps): Extension<ServerDeps>,
    query: Result<Query<ResourceQuery>, QueryRejection>,
) -> Result<Json<ResourcePage>, ApiError> {
    let Query(query) = query?;
    Ok(Json(list_resources(&deps.catalog, &query)))
}

/// `GET /api/v1/resources/:id`
pub async fn v1_resource_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(resource_id): Path<String>,
) -> Result<Json<ResourceDetailResponse>, ApiError> {
    let resource = deps
        .catalog
        .find(&resource_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;
    let favorite_count = deps.favorites.count_for(&resource_id).await?;

    Ok(Json(ResourceDetailResponse {
        success: true,
        resource,
        favorite_count,
    }))
}

/// `GET /api/v1/categories`
pub async fn v1_categories_handler(
    Extension(deps): Extension<ServerDeps>,
    query: Result<Query<CategoriesQuery>, QueryRejection>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let Query(query) = query?;
    let include_resources = query
        .include_resources
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    let (count, categories) = if include_resources {
        let details = category_details(&deps.catalog);
        (details.len(), CategoryList::Detailed(details))
    } else {
        let summaries = list_categories(&deps.catalog);
        (summaries.len(), CategoryList::Summaries(summaries))
    };

    Ok(Json(CategoriesResponse {
        success: true,
        count,
        categories,
    }))
}

/// `GET /api/v1/categories/:name`
pub async fn v1_category_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(name): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = find_category(&deps.catalog, &name)
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;
    Ok(Json(CategoryResponse {
        success: true,
        category,
    }))
}

/// `GET /api/v1/search`
pub async fn v1_search_handler(
    Extension(deps): Extension<ServerDeps>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query?;
    Ok(Json(search_resources(&deps.catalog, &query)?))
}

/// `GET /api/v1/user/favorites`
pub async fn v1_user_favorites_handler(
    Extension(deps): Extension<ServerDeps>,
) -> Result<Json<UserFavoritesResponse>, ApiError> {
    let response = list_user_favorites(deps.favorites.as_ref(), &deps.catalog).await?;
    Ok(Json(response))
}
