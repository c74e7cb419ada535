//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    add_favorite_handler, check_favorites_handler, export_favorites_handler,
    favorites_ics_handler, health_handler, remove_favorite_handler, resources_handler,
    rss_feed_handler, update_note_handler, v1_categories_handler, v1_category_handler,
    v1_resource_handler, v1_resources_handler, v1_search_handler, v1_user_favorites_handler,
};

/// CORS for the configured origins; any origin when none are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Directory page and favorites toggle
        .route("/api/resources", get(resources_handler))
        .route("/api/favorites/check", post(check_favorites_handler))
        .route("/api/favorite/add", post(add_favorite_handler))
        .route("/api/favorite/remove", post(remove_favorite_handler))
        .route("/api/favorite/update-note", post(update_note_handler))
        // Public REST API
        .route("/api/v1/resources", get(v1_resources_handler))
        .route("/api/v1/resources/:id", get(v1_resource_handler))
        .route("/api/v1/categories", get(v1_categories_handler))
        .route("/api/v1/categories/:name", get(v1_category_handler))
        .route("/api/v1/search", get(v1_search_handler))
        .route("/api/v1/user/favorites", get(v1_user_favorites_handler))
        .route("/api/v1/user/favorites/export", get(export_favorites_handler))
        // Feeds
        .route("/feed/rss", get(rss_feed_handler))
        .route("/feed/favorites.ics", get(favorites_ics_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(deps))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
