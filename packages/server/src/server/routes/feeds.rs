//! Downloads and syndication: favorites export, RSS and iCalendar feeds

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, HOST},
        HeaderMap,
    },
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::domains::favorites::{export_favorites, favorites_calendar, ExportFormat};
use crate::domains::resources::rss_feed;
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

fn attachment(content_type: &str, filename: &str, body: String) -> Response {
    (
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// `GET /api/v1/user/favorites/export?format=json|csv|txt`
pub async fn export_favorites_handler(
    Extension(deps): Extension<ServerDeps>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let format = match query.format.as_deref() {
        Some(format) => format.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };

    let export = export_favorites(
        deps.favorites.as_ref(),
        &deps.catalog,
        format,
        Utc::now().date_naive(),
    )
    .await?;
    tracing::debug!(filename = %export.filename, "Favorites exported");

    Ok(attachment(export.content_type, &export.filename, export.body))
}

/// `GET /feed/rss`
pub async fn rss_feed_handler(
    Extension(deps): Extension<ServerDeps>,
    headers: HeaderMap,
) -> Response {
    let link = headers
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{}/", host))
        .unwrap_or_else(|| "/".to_string());

    let xml = rss_feed(&deps.catalog, &link, Utc::now());
    ([(CONTENT_TYPE, "application/rss+xml")], xml).into_response()
}

/// `GET /feed/favorites.ics`
pub async fn favorites_ics_handler(
    Extension(deps): Extension<ServerDeps>,
) -> Result<Response, ApiError> {
    let calendar = favorites_calendar(deps.favorites.as_ref(), &deps.catalog).await?;
    Ok(attachment("text/calendar", "favorites.ics", calendar))
}
