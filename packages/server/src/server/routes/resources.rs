//! Resource list consumed by the directory and autocomplete

use axum::{extract::Extension, Json};
use catalog::ResourceList;

use crate::kernel::ServerDeps;

/// `GET /api/resources`
pub async fn resources_handler(Extension(deps): Extension<ServerDeps>) -> Json<ResourceList> {
    Json(ResourceList {
        resources: deps.catalog.resources().to_vec(),
    })
}
