//! Resource records and the category document they are flattened from

use serde::{Deserialize, Serialize};

/// A single catalog entry as served by `GET /api/resources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Resource {
    pub fn new(id: &str, name: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            category_icon: String::new(),
            tags: Vec::new(),
            url: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.category_icon = icon.to_string();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Lowercased tags joined with commas, the string facet predicates run against
    pub fn tag_string(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.to_lowercase())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// On-disk catalog: categories, each holding its resources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_icon() -> String {
    "\u{1F4DA}".to_string() // 📚
}

impl CatalogDocument {
    /// Flatten categories into resource records, in document order
    pub fn flatten(&self) -> Vec<Resource> {
        self.categories
            .iter()
            .flat_map(|category| {
                category.resources.iter().map(move |entry| Resource {
                    id: entry
                        .id
                        .clone()
                        .filter(|id| !id.is_empty())
                        .unwrap_or_else(|| slugify(&entry.name)),
                    name: entry.name.clone(),
                    description: entry.description.clone(),
                    category: category.name.clone(),
                    category_icon: category.icon.clone(),
                    tags: entry.tags.clone(),
                    url: entry.url.clone(),
                })
            })
            .collect()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Lowercase ASCII slug: alphanumerics kept, every other run collapsed to `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Khan Academy"), "khan-academy");
        assert_eq!(slugify("  Desmos: Graphing!! "), "desmos-graphing");
        assert_eq!(slugify("PhET"), "phet");
        assert_eq!(slugify("¿?"), "");
    }

    #[test]
    fn test_tag_string_is_lowercase() {
        let resource = Resource::new("a", "A", "Math").with_tags(&["Free", "High School"]);
        assert_eq!(resource.tag_string(), "free,high school");
    }

    #[test]
    fn test_flatten_copies_category_and_derives_ids() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{
                "categories": [
                    {
                        "name": "Math Tools",
                        "icon": "🔢",
                        "resources": [
                            {"name": "Desmos", "description": "Graphing", "tags": ["free"]},
                            {"id": "geo", "name": "GeoGebra"}
                        ]
                    },
                    {"name": "Empty"}
                ]
            }"#,
        )
        .unwrap();

        let flat = doc.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].id, "desmos");
        assert_eq!(flat[0].category, "Math Tools");
        assert_eq!(flat[0].category_icon, "🔢");
        assert_eq!(flat[1].id, "geo");
        assert_eq!(doc.category("Empty").unwrap().icon, "📚");
    }
}
