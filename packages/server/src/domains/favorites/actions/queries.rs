//! Favorite query actions

use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::str::FromStr;

use anyhow::Result;
use catalog::{Facet, FavoriteEntry, Resource, UserFavoritesResponse};
use chrono::NaiveDate;
use thiserror::Error;

use crate::domains::favorites::models::Favorite;
use crate::domains::resources::{Catalog, SITE_NAME};
use crate::kernel::BaseFavoriteRepository;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("Invalid format. Use json, csv, or txt")]
    InvalidFormat,
}

/// Download formats of the favorites export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Txt,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "txt" => Ok(Self::Txt),
            _ => Err(ExportError::InvalidFormat),
        }
    }
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Txt => "text/plain",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

/// A rendered download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesExport {
    pub content_type: &'static str,
    pub filename: String,
    pub body: String,
}

/// Which of `resource_ids` are saved. Only saved ids appear, mapped to `true`.
pub async fn check_favorites(
    repo: &dyn BaseFavoriteRepository,
    resource_ids: &[String],
) -> Result<HashMap<String, bool>> {
    if resource_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let wanted: HashSet<&str> = resource_ids.iter().map(String::as_str).collect();
    Ok(repo
        .list()
        .await?
        .into_iter()
        .filter(|f| wanted.contains(f.resource_id.as_str()))
        .map(|f| (f.resource_id, true))
        .collect())
}

/// Favorites paired with their catalog record, newest first.
///
/// Favorites whose resource is no longer in the catalog are skipped.
async fn saved_resources<'a>(
    repo: &dyn BaseFavoriteRepository,
    catalog: &'a Catalog,
) -> Result<Vec<(Favorite, &'a Resource)>> {
    Ok(repo
        .list()
        .await?
        .into_iter()
        .filter_map(|favorite| {
            let resource = catalog.find(&favorite.resource_id)?;
            Some((favorite, resource))
        })
        .collect())
}

/// Saved resources joined with the catalog, newest first
pub async fn list_user_favorites(
    repo: &dyn BaseFavoriteRepository,
    catalog: &Catalog,
) -> Result<UserFavoritesResponse> {
    let favorites: Vec<FavoriteEntry> = saved_resources(repo, catalog)
        .await?
        .into_iter()
        .map(|(favorite, resource)| FavoriteEntry {
            resource: resource.clone(),
            favorited_at: favorite.added_at.to_rfc3339(),
            user_note: Some(favorite.notes).filter(|n| !n.is_empty()),
        })
        .collect();

    Ok(UserFavoritesResponse {
        success: true,
        count: favorites.len(),
        favorites,
    })
}

/// Render the favorites list as a download named `favorites_<YYYYMMDD>.<ext>`
pub async fn export_favorites(
    repo: &dyn BaseFavoriteRepository,
    catalog: &Catalog,
    format: ExportFormat,
    today: NaiveDate,
) -> Result<FavoritesExport> {
    let response = list_user_favorites(repo, catalog).await?;

    let body = match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&serde_json::json!({ "favorites": response.favorites }))?
        }
        ExportFormat::Csv => favorites_csv(&response.favorites),
        ExportFormat::Txt => favorites_txt(&response.favorites, today),
    };

    Ok(FavoritesExport {
        content_type: format.content_type(),
        filename: format!("favorites_{}.{}", today.format("%Y%m%d"), format.extension()),
        body,
    })
}

/// Labels of the values of `facet` a resource's tags satisfy, joined with `; `
fn facet_labels(resource: &Resource, facet: Facet) -> String {
    let tags = resource.tag_string();
    facet
        .values()
        .filter(|v| v.matches(&tags))
        .map(|v| v.label())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Quote a CSV field when it holds a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn favorites_csv(favorites: &[FavoriteEntry]) -> String {
    let mut out = String::from(
        "Name,Description,URL,Category,Cost,Grades,My Note,Added Date\r\n",
    );
    for entry in favorites {
        let resource = &entry.resource;
        let row = [
            resource.name.clone(),
            resource.description.clone(),
            resource.url.clone().unwrap_or_default(),
            resource.category.clone(),
            facet_labels(resource, Facet::Cost),
            facet_labels(resource, Facet::Grade),
            entry.user_note.clone().unwrap_or_default(),
            entry.favorited_at.clone(),
        ];
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

fn favorites_txt(favorites: &[FavoriteEntry], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "My Favorite Teaching Resources - {}",
        today.format("%B %d, %Y")
    );
    let _ = writeln!(out, "{}\n", "=".repeat(80));

    for entry in favorites {
        let resource = &entry.resource;
        let _ = writeln!(out, "📌 {}", resource.name);
        let _ = writeln!(out, "   {}", resource.description);
        let _ = writeln!(out, "   🔗 {}", resource.url.as_deref().unwrap_or_default());
        let _ = writeln!(out, "   📂 {}", resource.category);
        if let Some(note) = &entry.user_note {
            let _ = writeln!(out, "   💭 Note: {}", note);
        }
        out.push('\n');
    }
    out
}

/// Escape an iCalendar TEXT value
fn ical_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

/// Favorites as a VCALENDAR of VTODO items, newest first, CRLF line endings
pub async fn favorites_calendar(
    repo: &dyn BaseFavoriteRepository,
    catalog: &Catalog,
) -> Result<String> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:-//{}//EN", SITE_NAME),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "X-WR-CALNAME:My Favorite Teaching Resources".to_string(),
        "X-WR-TIMEZONE:UTC".to_string(),
        format!("X-WR-CALDESC:Favorited teaching resources from {}", SITE_NAME),
    ];

    for (favorite, resource) in saved_resources(repo, catalog).await? {
        let url = resource.url.as_deref().unwrap_or_default();
        lines.extend([
            "BEGIN:VTODO".to_string(),
            format!("UID:{}@teachinghub.local", favorite.resource_id),
            format!("DTSTAMP:{}", favorite.added_at.format("%Y%m%dT%H%M%SZ")),
            format!("SUMMARY:{}", ical_text(&resource.name)),
            format!(
                "DESCRIPTION:{}\\n\\nURL: {}",
                ical_text(&resource.description),
                url
            ),
            format!("URL:{}", url),
            format!("CATEGORIES:{}", ical_text(&resource.category)),
            "STATUS:NEEDS-ACTION".to_string(),
            "PRIORITY:5".to_string(),
            "END:VTODO".to_string(),
        ]);
    }

    lines.push("END:VCALENDAR".to_string());
    Ok(lines.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::favorites::models::Favorite;
    use crate::kernel::InMemoryFavoriteRepository;

    #[tokio::test]
    async fn test_check_only_reports_saved_ids() {
        let repo = InMemoryFavoriteRepository::new();
        repo.insert(Favorite::new("a", "")).await.unwrap();
        repo.insert(Favorite::new("z", "")).await.unwrap();

        let favorited = check_favorites(&repo, &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(favorited, HashMap::from([("a".to_string(), true)]));
        assert!(check_favorites(&repo, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_favorites_join_catalog_newest_first() {
        let catalog = Catalog::from_json(
            r#"{"categories":[{"name":"Math","resources":[{"name":"Desmos"},{"name":"IXL"}]}]}"#,
        )
        .unwrap();
        let repo = InMemoryFavoriteRepository::new();
        repo.insert(Favorite::new("desmos", "graphs")).await.unwrap();
        repo.insert(Favorite::new("retired-tool", "")).await.unwrap();
        repo.insert(Favorite::new("ixl", "")).await.unwrap();

        let response = list_user_favorites(&repo, &catalog).await.unwrap();
        let ids: Vec<&str> = response
            .favorites
            .iter()
            .map(|f| f.resource.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ixl", "desmos"]);
        assert_eq!(response.count, 2);
        assert_eq!(response.favorites[1].user_note.as_deref(), Some("graphs"));
        assert_eq!(response.favorites[0].user_note, None);
    }

    fn export_catalog() -> Catalog {
        Catalog::from_json(
            r#"{"categories":[{"name":"Math","resources":[
                {"name":"Desmos","description":"Graphing, free","url":"https://www.desmos.com","tags":["Free","High School"]},
                {"name":"IXL","description":"Practice","tags":["Premium","K-5","Middle School"]}
            ]}]}"#,
        )
        .unwrap()
    }

    async fn saved(entries: &[(&str, &str, u32)]) -> InMemoryFavoriteRepository {
        use chrono::TimeZone;
        let repo = InMemoryFavoriteRepository::new();
        for (id, note, day) in entries {
            let mut favorite = Favorite::new(id, note);
            favorite.added_at = chrono::Utc.with_ymd_and_hms(2024, 9, *day, 8, 30, 0).unwrap();
            repo.insert(favorite).await.unwrap();
        }
        repo
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("txt".parse::<ExportFormat>(), Ok(ExportFormat::Txt));
        assert_eq!("xml".parse::<ExportFormat>(), Err(ExportError::InvalidFormat));
        assert_eq!(
            ExportError::InvalidFormat.to_string(),
            "Invalid format. Use json, csv, or txt"
        );
    }

    #[tokio::test]
    async fn test_csv_export_quotes_and_derives_cost_and_grades() {
        let repo = saved(&[("desmos", "graphs, \"fun\"", 1), ("ixl", "", 2)]).await;
        let today = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();

        let export = export_favorites(&repo, &export_catalog(), ExportFormat::Csv, today)
            .await
            .unwrap();

        assert_eq!(export.content_type, "text/csv");
        assert_eq!(export.filename, "favorites_20240903.csv");
        let lines: Vec<&str> = export.body.split("\r\n").collect();
        assert_eq!(lines[0], "Name,Description,URL,Category,Cost,Grades,My Note,Added Date");
        assert_eq!(
            lines[1],
            "IXL,Practice,,Math,Premium/Paid,Elementary; Middle School,,2024-09-02T08:30:00+00:00"
        );
        assert_eq!(
            lines[2],
            "Desmos,\"Graphing, free\",https://www.desmos.com,Math,Free,High School,\"graphs, \"\"fun\"\"\",2024-09-01T08:30:00+00:00"
        );
        assert_eq!(lines[3], "");
    }

    #[tokio::test]
    async fn test_txt_and_json_exports() {
        let repo = saved(&[("desmos", "graphs", 1), ("ixl", "", 2)]).await;
        let today = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();

        let txt = export_favorites(&repo, &export_catalog(), ExportFormat::Txt, today)
            .await
            .unwrap();
        assert_eq!(txt.content_type, "text/plain");
        assert!(txt
            .body
            .starts_with("My Favorite Teaching Resources - September 03, 2024\n===="));
        assert!(txt.body.contains("📌 Desmos\n   Graphing, free\n   🔗 https://www.desmos.com\n   📂 Math\n   💭 Note: graphs\n"));
        assert_eq!(txt.body.matches("💭").count(), 1);

        let json = export_favorites(&repo, &export_catalog(), ExportFormat::Json, today)
            .await
            .unwrap();
        assert_eq!(json.filename, "favorites_20240903.json");
        let value: serde_json::Value = serde_json::from_str(&json.body).unwrap();
        assert_eq!(value["favorites"][0]["id"], "ixl");
        assert_eq!(value["favorites"][1]["user_note"], "graphs");
    }

    #[tokio::test]
    async fn test_calendar_lists_todos_newest_first() {
        let repo = saved(&[("desmos", "", 1), ("retired-tool", "", 2), ("ixl", "", 3)]).await;

        let ics = favorites_calendar(&repo, &export_catalog()).await.unwrap();
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines[0], "BEGIN:VCALENDAR");
        assert_eq!(lines[2], "PRODID:-//Teaching Resources Hub//EN");
        assert_eq!(*lines.last().unwrap(), "END:VCALENDAR");
        assert_eq!(ics.matches("BEGIN:VTODO").count(), 2);

        let uids: Vec<&str> = lines.iter().filter(|l| l.starts_with("UID:")).copied().collect();
        assert_eq!(uids, vec!["UID:ixl@teachinghub.local", "UID:desmos@teachinghub.local"]);
        assert!(lines.contains(&"DTSTAMP:20240901T083000Z"));
        assert!(lines.contains(&"DESCRIPTION:Graphing\\, free\\n\\nURL: https://www.desmos.com"));
        assert!(lines.contains(&"URL:"));
    }
}
